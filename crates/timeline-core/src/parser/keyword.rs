//! Keyword recognizers (spec §4.1). Keywords are case-sensitive lowercase;
//! each accepts the aliases spec.md lists.

use super::ParseError;

/// `/:duration/` — `from` or `since`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Duration {
    From,
    Since,
}

impl Duration {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        match text {
            "from" => Ok(Self::From),
            "since" => Ok(Self::Since),
            _ => Err(ParseError::new("duration", format!("'{text}' is not from/since"))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::Since => "since",
        }
    }
}

/// Which sentinel keyword set a family's primary sort key uses: a
/// time-based family (`earliest`/`latest`) or a quantity-based one
/// (`least`/`most`). Plain `min`/`max` is accepted as an alias under both.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SentinelAxis {
    Time,
    Quantity,
}

/// The extreme end of a family's sort order a sentinel denotes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MinMax {
    Min,
    Max,
}

/// Classify an anchor string as a sentinel under the given axis, or `None`
/// if it isn't a recognized sentinel keyword at all (it may still be a
/// valid identifier anchor, or outright invalid — the caller decides).
#[must_use]
pub fn parse_sentinel(text: &str, axis: SentinelAxis) -> Option<MinMax> {
    match axis {
        SentinelAxis::Time => match text {
            "min" | "earliest" => Some(MinMax::Min),
            "max" | "latest" => Some(MinMax::Max),
            _ => None,
        },
        SentinelAxis::Quantity => match text {
            "min" | "least" => Some(MinMax::Min),
            "max" | "most" => Some(MinMax::Max),
            _ => None,
        },
    }
}

/// `/filter/:filter/` — transfer-transaction subfilters.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransferFilter {
    Mosaic,
    Multisig,
}

impl TransferFilter {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        match text {
            "mosaic" => Ok(Self::Mosaic),
            "multisig" => Ok(Self::Multisig),
            _ => Err(ParseError::new(
                "filter",
                format!("'{text}' is not mosaic/multisig"),
            )),
        }
    }
}

/// `/type/:type/` — transaction type discriminator. Not exhaustive of every
/// network transaction type; the families that filter by type only need the
/// subset they actually dispatch on (spec §4.3: type/filter combinations are
/// "currently defined only for the transfer type").
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransactionType {
    Transfer,
    RegisterNamespace,
    AddressAlias,
    MosaicAlias,
    MosaicDefinition,
    MosaicSupplyChange,
    MultisigAccountModification,
    AggregateComplete,
    AggregateBonded,
    HashLock,
    SecretLock,
    SecretProof,
}

impl TransactionType {
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        match text {
            "transfer" => Ok(Self::Transfer),
            "registerNamespace" => Ok(Self::RegisterNamespace),
            "addressAlias" => Ok(Self::AddressAlias),
            "mosaicAlias" => Ok(Self::MosaicAlias),
            "mosaicDefinition" => Ok(Self::MosaicDefinition),
            "mosaicSupplyChange" => Ok(Self::MosaicSupplyChange),
            "multisigAccountModification" => Ok(Self::MultisigAccountModification),
            "aggregateComplete" => Ok(Self::AggregateComplete),
            "aggregateBonded" => Ok(Self::AggregateBonded),
            "hashLock" => Ok(Self::HashLock),
            "secretLock" => Ok(Self::SecretLock),
            "secretProof" => Ok(Self::SecretProof),
            _ => Err(ParseError::new("type", format!("'{text}' is not a recognized transaction type"))),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "transfer",
            Self::RegisterNamespace => "registerNamespace",
            Self::AddressAlias => "addressAlias",
            Self::MosaicAlias => "mosaicAlias",
            Self::MosaicDefinition => "mosaicDefinition",
            Self::MosaicSupplyChange => "mosaicSupplyChange",
            Self::MultisigAccountModification => "multisigAccountModification",
            Self::AggregateComplete => "aggregateComplete",
            Self::AggregateBonded => "aggregateBonded",
            Self::HashLock => "hashLock",
            Self::SecretLock => "secretLock",
            Self::SecretProof => "secretProof",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_accepts_only_from_since() {
        assert!(Duration::parse("from").is_ok());
        assert!(Duration::parse("since").is_ok());
        assert!(Duration::parse("longest").is_err());
    }

    #[test]
    fn time_sentinel_aliases() {
        assert_eq!(parse_sentinel("earliest", SentinelAxis::Time), Some(MinMax::Min));
        assert_eq!(parse_sentinel("min", SentinelAxis::Time), Some(MinMax::Min));
        assert_eq!(parse_sentinel("latest", SentinelAxis::Time), Some(MinMax::Max));
        assert_eq!(parse_sentinel("longest", SentinelAxis::Time), None);
    }

    #[test]
    fn quantity_sentinel_aliases() {
        assert_eq!(parse_sentinel("least", SentinelAxis::Quantity), Some(MinMax::Min));
        assert_eq!(parse_sentinel("most", SentinelAxis::Quantity), Some(MinMax::Max));
        assert_eq!(parse_sentinel("earliest", SentinelAxis::Quantity), None);
    }
}
