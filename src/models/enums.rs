use serde::{Deserialize, Serialize};

/// A string that does not match any variant of a wire enum.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Invalid {field} value: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// The literal is both the wire string (serde rename) and the stored form.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(#[serde(rename = $s)] $variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Role {
    Patient => "PATIENT",
    Admin => "ADMIN",
});

str_enum!(AppointmentStatus {
    Pending => "PENDING",
    Confirmed => "CONFIRMED",
    Cancelled => "CANCELLED",
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_round_trip() {
        for (variant, s) in [(Role::Patient, "PATIENT"), (Role::Admin, "ADMIN")] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(Role::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn appointment_status_round_trip() {
        for (variant, s) in [
            (AppointmentStatus::Pending, "PENDING"),
            (AppointmentStatus::Confirmed, "CONFIRMED"),
            (AppointmentStatus::Cancelled, "CANCELLED"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(AppointmentStatus::from_str(s).unwrap(), variant);
        }
    }

    #[test]
    fn serde_uses_wire_strings() {
        let json = serde_json::to_string(&AppointmentStatus::Confirmed).unwrap();
        assert_eq!(json, "\"CONFIRMED\"");

        let parsed: Role = serde_json::from_str("\"PATIENT\"").unwrap();
        assert_eq!(parsed, Role::Patient);
    }

    #[test]
    fn invalid_enum_returns_error() {
        assert!(Role::from_str("patient").is_err());
        assert!(AppointmentStatus::from_str("DONE").is_err());
        assert!(AppointmentStatus::from_str("").is_err());
    }

    #[test]
    fn invalid_enum_names_field_and_value() {
        let err = Role::from_str("ROOT").unwrap_err();
        assert_eq!(err.field, "Role");
        assert_eq!(err.value, "ROOT");
        assert!(err.to_string().contains("ROOT"));
    }
}
