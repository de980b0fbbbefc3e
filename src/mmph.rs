//------------ MMPH — bucketed monotone minimal perfect hash -----------------
//
// Partitions a sorted key set into fixed-size buckets, each with a local
// MPHF (`boomphf`, the same collaborator HZFT uses) and a small `ranks`
// array; routes a query to a bucket via an AZFT over the bucket
// delimiters, then validates the whole thing by re-checking every key's
// rank — turning a Monte Carlo structure into a Las Vegas one by
// retrying with a fresh seed, and escalating the AZFT's signature width,
// until it converges or the budget is spent.

use boomphf::Mphf;
use log::{debug, warn};

use crate::azft::Azft;
use crate::bitstring::BitString;
use crate::error::BuildError;
use crate::params::{escalate_width, select_signature_width, BuildOptions, SignatureWidth};
use crate::zfast::Zft;

struct Bucket {
    mphf: Mphf<BitString>,
    ranks: Vec<u32>,
}

pub struct Mmph {
    bucket_size: usize,
    buckets: Vec<Bucket>,
    delimiters: Vec<BitString>,
    delimiter_azft: Option<Azft>,
    len: usize,
}

impl Mmph {
    /// Build an MMPH over a sorted, distinct key set, validating (and
    /// retrying with re-seeding/width-escalation) until the constructed
    /// structure answers `rank` correctly on every key of `keys`.
    pub fn build(keys: &[BitString], options: &BuildOptions) -> Result<Mmph, BuildError> {
        if keys.is_empty() {
            return Ok(Mmph {
                bucket_size: options.bucket_size,
                buckets: Vec::new(),
                delimiters: Vec::new(),
                delimiter_azft: None,
                len: 0,
            });
        }

        let bucket_size = options.bucket_size.max(1);
        let buckets_plain: Vec<&[BitString]> = keys.chunks(bucket_size).collect();
        let delimiters: Vec<BitString> = buckets_plain.iter().map(|b| b.last().unwrap().clone()).collect();

        let buckets: Vec<Bucket> = buckets_plain
            .iter()
            .map(|chunk| {
                let mphf = Mphf::new(2.0, &chunk.to_vec());
                let mut ranks = vec![0u32; chunk.len()];
                for (local_idx, key) in chunk.iter().enumerate() {
                    ranks[mphf.hash(key) as usize] = local_idx as u32;
                }
                Bucket { mphf, ranks }
            })
            .collect();
        debug!("mmph bucket build: {} buckets of size {bucket_size} over {} keys", buckets.len(), keys.len());

        let max_len = keys.iter().map(|k| k.len()).max().unwrap_or(0);
        let mut sig_bits: u8 = match options.signature_width {
            SignatureWidth::Fixed(w) => w,
            SignatureWidth::Auto => select_signature_width(keys.len(), max_len, buckets.len()),
        };
        let mut seed = options.seed;
        let mut last_err = String::new();

        let stages: usize = match options.signature_width {
            SignatureWidth::Fixed(_) => 1, // single pass, width fixed
            SignatureWidth::Auto => 3,     // the width escalates on each stage instead
        };

        debug!(
            "mmph build: {} keys, {} buckets, starting sig_bits={sig_bits}",
            keys.len(),
            buckets.len()
        );

        for _stage in 0..stages {
            for attempt in 0..options.max_retries {
                let mut zft = Zft::build_from_iterator(delimiters.iter().cloned())?;
                let delimiter_azft = Azft::build(&mut zft, seed, sig_bits, 2.0);

                if validate(&delimiter_azft, &buckets, &delimiters, bucket_size, keys) {
                    debug!("mmph build converged: sig_bits={sig_bits}, attempt={attempt}");
                    return Ok(Mmph {
                        bucket_size,
                        buckets,
                        delimiters,
                        delimiter_azft: Some(delimiter_azft),
                        len: keys.len(),
                    });
                }
                last_err = format!(
                    "validation failed at sig_bits={sig_bits}, attempt={attempt}"
                );
                warn!("mmph retry: {last_err}, reseeding");
                seed = seed.wrapping_add(1).wrapping_mul(2862933555777941757).wrapping_add(1);
            }
            if !matches!(options.signature_width, SignatureWidth::Fixed(_)) {
                let escalated = escalate_width(sig_bits);
                debug!("mmph escalating signature width: {sig_bits} -> {escalated}");
                sig_bits = escalated;
            }
        }

        Err(BuildError::BuildFailed { reason: last_err, last_seed: seed })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Exact rank of `q` in the original sorted set, or `None` if `q`
    /// was not a member of the built set (a clean miss rather than an
    /// undefined result).
    pub fn rank(&self, q: &BitString) -> Option<usize> {
        let azft = self.delimiter_azft.as_ref()?;
        rank_against(azft, &self.buckets, &self.delimiters, self.bucket_size, q)
    }

    pub fn byte_size(&self) -> usize {
        let buckets_bytes: usize = self
            .buckets
            .iter()
            .map(|b| (b.ranks.len() as f64 * 3.0 / 8.0).ceil() as usize + b.ranks.len() * 4)
            .sum();
        let delimiters_bytes: usize =
            self.delimiters.iter().map(|d| 8 + d.len().div_ceil(8) as usize).sum();
        buckets_bytes + delimiters_bytes
    }
}

fn validate(
    delimiter_azft: &Azft,
    buckets: &[Bucket],
    delimiters: &[BitString],
    bucket_size: usize,
    keys: &[BitString],
) -> bool {
    for (expected_rank, key) in keys.iter().enumerate() {
        match rank_against(delimiter_azft, buckets, delimiters, bucket_size, key) {
            Some(r) if r == expected_rank => {}
            _ => return false,
        }
    }
    true
}

fn rank_against(
    delimiter_azft: &Azft,
    buckets: &[Bucket],
    delimiters: &[BitString],
    bucket_size: usize,
    q: &BitString,
) -> Option<usize> {
    if buckets.is_empty() {
        return None;
    }
    let candidates = delimiter_azft.lower_bound(q);
    let mut bucket_idx = None;
    for nd in candidates {
        if nd.rank == crate::azft::SENTINEL {
            continue;
        }
        let idx = nd.rank as usize;
        if idx >= delimiters.len() {
            continue;
        }
        if delimiters[idx].compare(q) != std::cmp::Ordering::Less {
            bucket_idx = Some(idx);
            break;
        }
    }
    let bucket_idx = bucket_idx.or_else(|| {
        // Fall back to the last bucket if every delimiter is smaller
        // than `q` (q is lexicographically past the whole set).
        if delimiters.last().map(|d| d.compare(q) != std::cmp::Ordering::Less).unwrap_or(false) {
            None
        } else {
            Some(delimiters.len() - 1)
        }
    })?;

    let bucket = &buckets[bucket_idx];
    let slot = bucket.mphf.try_hash(q)?;
    let local = *bucket.ranks.get(slot as usize)?;
    Some(bucket_idx * bucket_size + local as usize)
}
