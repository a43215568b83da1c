use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
#[error("Invalid value for {field}: {value:?}")]
pub struct InvalidEnumValue {
    pub field: &'static str,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$(Self::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnumValue {
                        field: stringify!($name),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(BloodType {
    APos => "A+",
    ANeg => "A-",
    BPos => "B+",
    BNeg => "B-",
    AbPos => "AB+",
    AbNeg => "AB-",
    OPos => "O+",
    ONeg => "O-",
});

str_enum!(RequestStatus {
    Active => "active",
    Fulfilled => "fulfilled",
    Expired => "expired",
});

impl BloodType {
    /// Blood types eligible to donate to a recipient of this type.
    ///
    /// Total over the enum: every set is non-empty and contains the
    /// type itself. O- appears in all eight sets (universal donor);
    /// AB+ receives from all eight (universal recipient).
    pub fn compatible_donor_types(self) -> &'static [BloodType] {
        use BloodType::*;
        match self {
            APos => &[APos, ANeg, OPos, ONeg],
            ANeg => &[ANeg, ONeg],
            BPos => &[BPos, BNeg, OPos, ONeg],
            BNeg => &[BNeg, ONeg],
            AbPos => &[APos, ANeg, BPos, BNeg, AbPos, AbNeg, OPos, ONeg],
            AbNeg => &[ANeg, BNeg, AbNeg, ONeg],
            OPos => &[OPos, ONeg],
            ONeg => &[ONeg],
        }
    }

    /// Can a donor of type `donor` give to a recipient of type `self`?
    pub fn accepts_donor(self, donor: BloodType) -> bool {
        self.compatible_donor_types().contains(&donor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn blood_type_round_trip() {
        for (variant, s) in [
            (BloodType::APos, "A+"),
            (BloodType::ANeg, "A-"),
            (BloodType::BPos, "B+"),
            (BloodType::BNeg, "B-"),
            (BloodType::AbPos, "AB+"),
            (BloodType::AbNeg, "AB-"),
            (BloodType::OPos, "O+"),
            (BloodType::ONeg, "O-"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(BloodType::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn request_status_round_trip() {
        for (variant, s) in [
            (RequestStatus::Active, "active"),
            (RequestStatus::Fulfilled, "fulfilled"),
            (RequestStatus::Expired, "expired"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(RequestStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_wire_strings() {
        assert_eq!(serde_json::to_value(BloodType::AbNeg).unwrap(), "AB-");
        assert_eq!(
            serde_json::from_str::<BloodType>("\"O+\"").unwrap(),
            BloodType::OPos
        );
        assert_eq!(serde_json::to_value(RequestStatus::Active).unwrap(), "active");
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(BloodType::from_str("C+").is_err());
        assert!(BloodType::from_str("ab+").is_err());
        assert!(RequestStatus::from_str("").is_err());
    }

    #[test]
    fn every_compatibility_set_contains_self() {
        for &bt in BloodType::ALL {
            let set = bt.compatible_donor_types();
            assert!(!set.is_empty(), "{bt} has an empty donor set");
            assert!(set.contains(&bt), "{bt} cannot receive from itself");
        }
    }

    #[test]
    fn o_negative_is_universal_donor() {
        for &bt in BloodType::ALL {
            assert!(
                bt.accepts_donor(BloodType::ONeg),
                "{bt} should accept O- donors"
            );
        }
    }

    #[test]
    fn ab_positive_is_universal_recipient() {
        assert_eq!(BloodType::AbPos.compatible_donor_types().len(), 8);
        for &bt in BloodType::ALL {
            assert!(BloodType::AbPos.accepts_donor(bt));
        }
    }

    #[test]
    fn a_positive_rejects_b_donors() {
        assert!(!BloodType::APos.accepts_donor(BloodType::BPos));
        assert!(!BloodType::APos.accepts_donor(BloodType::BNeg));
        assert!(!BloodType::APos.accepts_donor(BloodType::AbPos));
    }

    #[test]
    fn exact_table_values() {
        use BloodType::*;
        assert_eq!(ONeg.compatible_donor_types(), &[ONeg]);
        assert_eq!(OPos.compatible_donor_types(), &[OPos, ONeg]);
        assert_eq!(ANeg.compatible_donor_types(), &[ANeg, ONeg]);
        assert_eq!(APos.compatible_donor_types(), &[APos, ANeg, OPos, ONeg]);
        assert_eq!(BNeg.compatible_donor_types(), &[BNeg, ONeg]);
        assert_eq!(BPos.compatible_donor_types(), &[BPos, BNeg, OPos, ONeg]);
        assert_eq!(AbNeg.compatible_donor_types(), &[ANeg, BNeg, AbNeg, ONeg]);
    }
}
