use num_bigint::BigUint;
use std::collections::HashSet;

use crate::{
    conv::{decode, parse_base},
    document::ShareDocument,
    Error,
};

/// A point (x, y = f(x)) on the sharing polynomial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedShare {
    pub x: u64,
    pub y: BigUint,
}

impl DecodedShare {
    pub fn new(x: u64, y: impl Into<BigUint>) -> Self {
        Self { x, y: y.into() }
    }
}

/// Ordered shares with pairwise distinct x coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareSet {
    shares: Vec<DecodedShare>,
    xs: HashSet<u64>,
}

impl ShareSet {
    pub fn new(shares: Vec<DecodedShare>) -> Result<Self, Error> {
        let mut set = Self::default();
        for share in shares {
            set.push(share)?;
        }
        Ok(set)
    }

    pub fn push(&mut self, share: DecodedShare) -> Result<(), Error> {
        if !self.xs.insert(share.x) {
            return Err(Error::DuplicateX { x: share.x });
        }
        self.shares.push(share);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.shares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shares.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DecodedShare> {
        self.shares.iter()
    }

    pub fn as_slice(&self) -> &[DecodedShare] {
        &self.shares
    }

    pub fn xs(&self) -> Vec<u64> {
        self.shares.iter().map(|s| s.x).collect()
    }

    pub fn ys(&self) -> Vec<BigUint> {
        self.shares.iter().map(|s| s.y.clone()).collect()
    }
}

impl<'a> IntoIterator for &'a ShareSet {
    type Item = &'a DecodedShare;
    type IntoIter = std::slice::Iter<'a, DecodedShare>;

    fn into_iter(self) -> Self::IntoIter {
        self.shares.iter()
    }
}

fn parse_x(key: &str) -> Result<u64, Error> {
    match key.parse::<u64>() {
        Ok(x) if x > 0 => Ok(x),
        _ => Err(Error::MalformedKey {
            key: key.to_owned(),
        }),
    }
}

/// Decodes every non-metadata entry of `document`, in document order.
///
/// The declared threshold is informational only, all shares present are used.
pub fn collect(document: &ShareDocument) -> Result<ShareSet, Error> {
    let mut shares = ShareSet::default();
    for (key, entry) in &document.entries {
        let x = parse_x(key)?;
        let base = parse_base(&entry.base)?;
        let y = decode(base, &entry.value)?;
        tracing::debug!(x, base, y = %y, "decoded share");
        shares.push(DecodedShare { x, y })?;
    }

    if let Some(metadata) = &document.metadata {
        let count = shares.len() as u64;
        if let Some(k) = metadata.k {
            if count < k {
                tracing::warn!(k, count, "fewer shares than the declared threshold");
            }
        }
        if let Some(n) = metadata.n {
            if count != n {
                tracing::warn!(n, count, "share count differs from the declared total");
            }
        }
    }

    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{EncodedShare, Metadata};

    fn entry(key: &str, base: &str, value: &str) -> (String, EncodedShare) {
        (
            key.to_owned(),
            EncodedShare {
                base: base.to_owned(),
                value: value.to_owned(),
            },
        )
    }

    #[test]
    fn test_collect_preserves_order() {
        let document = ShareDocument {
            metadata: Some(Metadata {
                n: Some(3),
                k: Some(2),
            }),
            entries: vec![
                entry("3", "2", "111"),
                entry("1", "16", "ff"),
                entry("2", "10", "12"),
            ],
        };
        let shares = collect(&document).unwrap();
        assert_eq!(shares.xs(), vec![3, 1, 2]);
        assert_eq!(
            shares.ys(),
            vec![
                BigUint::from(7u32),
                BigUint::from(255u32),
                BigUint::from(12u32)
            ]
        );
    }

    #[test]
    fn test_collect_duplicate_x() {
        let document = ShareDocument {
            metadata: None,
            entries: vec![entry("1", "10", "5"), entry("01", "10", "6")],
        };
        assert!(matches!(collect(&document), Err(Error::DuplicateX { x: 1 })));
    }

    #[test]
    fn test_collect_malformed_key() {
        for key in ["0", "-1", "abc", "", "1.5"] {
            let document = ShareDocument {
                metadata: None,
                entries: vec![entry(key, "10", "5")],
            };
            assert!(
                matches!(collect(&document), Err(Error::MalformedKey { key: k }) if k == key),
                "key {key:?}"
            );
        }
    }

    #[test]
    fn test_collect_key_above_u64() {
        let key = "18446744073709551616";
        let document = ShareDocument {
            metadata: None,
            entries: vec![entry(key, "10", "5")],
        };
        let err = collect(&document).unwrap_err();
        assert!(matches!(&err, Error::MalformedKey { key: k } if k == key));
        assert!(err.to_string().contains("18446744073709551615"));
    }

    #[test]
    fn test_collect_propagates_decoder_errors() {
        let document = ShareDocument {
            metadata: None,
            entries: vec![entry("1", "8", "19")],
        };
        assert!(matches!(
            collect(&document),
            Err(Error::InvalidDigit {
                base: 8,
                character: '9',
                position: 1
            })
        ));

        let document = ShareDocument {
            metadata: None,
            entries: vec![entry("1", "99", "1")],
        };
        assert!(matches!(collect(&document), Err(Error::InvalidBase(b)) if b == "99"));
    }

    #[test]
    fn test_collect_ignores_threshold() {
        let document = ShareDocument {
            metadata: Some(Metadata {
                n: Some(10),
                k: Some(7),
            }),
            entries: vec![entry("1", "10", "5")],
        };
        let shares = collect(&document).unwrap();
        assert_eq!(shares.xs(), vec![1]);
        assert_eq!(shares.ys(), vec![BigUint::from(5u32)]);
    }

    #[test]
    fn test_collect_metadata_mismatch_keeps_shares() {
        let entries = vec![entry("2", "10", "5"), entry("1", "10", "3")];
        let bare = collect(&ShareDocument {
            metadata: None,
            entries: entries.clone(),
        })
        .unwrap();

        // k above the count, n below it
        let declared = collect(&ShareDocument {
            metadata: Some(Metadata {
                n: Some(1),
                k: Some(5),
            }),
            entries,
        })
        .unwrap();
        assert_eq!(declared, bare);
        assert_eq!(declared.xs(), vec![2, 1]);
    }

    #[test]
    fn test_share_set_rejects_duplicates() {
        let err = ShareSet::new(vec![DecodedShare::new(4, 1u32), DecodedShare::new(4, 2u32)]);
        assert!(matches!(err, Err(Error::DuplicateX { x: 4 })));
    }
}
