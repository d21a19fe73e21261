//! Status vocabulary for accounts, devices and device clones.
//!
//! Every value is persisted as its display string (e.g. `"Logged In"`), which is also the
//! JSON representation. Each status maps to a display class tag the dashboard uses for
//! colouring badges.

use thiserror::Error;

/// Returned when a stored or submitted string is not part of a vocabulary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} value: {value:?}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $value:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            Debug,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize,
            ::utoipa::ToSchema,
        )]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $value)] $variant),+
        }

        impl $name {
            /// Every value in declaration order
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// The persisted string form
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $value),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::model::status::UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($value => Ok($name::$variant),)+
                    _ => Err($crate::model::status::UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

pub(crate) use string_enum;

string_enum! {
    /// Lifecycle state of a managed account
    AccountStatus {
        Unused => "Unused",
        Assigned => "Assigned",
        LoggedIn => "Logged In",
        LoginError => "Login Error",
        Challenge => "Challenge",
        TwoFactor => "Two Factor",
        Banned => "Banned",
        Inactive => "Inactive",
    }
}

impl AccountStatus {
    /// How far along the login lifecycle a status is.
    ///
    /// Clone assignment only ever moves an account forward to [`AccountStatus::Assigned`];
    /// statuses of a higher rank are left untouched.
    pub fn progress_rank(&self) -> u8 {
        match self {
            Self::Unused | Self::Inactive => 0,
            Self::Assigned => 1,
            Self::LoggedIn | Self::LoginError | Self::Challenge | Self::TwoFactor => 2,
            Self::Banned => 3,
        }
    }

    /// Returns `target` if it is further along than `self`, otherwise `self`
    pub fn advance_to(self, target: AccountStatus) -> AccountStatus {
        if target.progress_rank() > self.progress_rank() {
            target
        } else {
            self
        }
    }

    pub fn display_class(&self) -> &'static str {
        match self {
            Self::Unused => "status-neutral",
            Self::Assigned => "status-info",
            Self::LoggedIn => "status-success",
            Self::LoginError | Self::Challenge | Self::TwoFactor => "status-warning",
            Self::Banned => "status-danger",
            Self::Inactive => "status-muted",
        }
    }
}

string_enum! {
    /// Whether IMAP access to the account's mailbox is enabled
    ImapStatus {
        On => "On",
        Off => "Off",
    }
}

impl ImapStatus {
    pub fn display_class(&self) -> &'static str {
        match self {
            Self::On => "status-success",
            Self::Off => "status-muted",
        }
    }
}

string_enum! {
    /// State of a physical or virtual device
    DeviceStatus {
        Available => "Available",
        LoggedIn => "Logged In",
        Maintenance => "Maintenance",
        Broken => "Broken",
    }
}

impl DeviceStatus {
    /// Devices in maintenance or broken cannot receive new clone assignments
    pub fn accepts_assignments(&self) -> bool {
        matches!(self, Self::Available | Self::LoggedIn)
    }

    pub fn display_class(&self) -> &'static str {
        match self {
            Self::Available => "status-neutral",
            Self::LoggedIn => "status-success",
            Self::Maintenance => "status-warning",
            Self::Broken => "status-danger",
        }
    }
}

string_enum! {
    /// State of a clone slot on a device
    CloneStatus {
        Available => "Available",
        Assigned => "Assigned",
        LoggedIn => "Logged In",
        LoginError => "Login Error",
        Maintenance => "Maintenance",
        Broken => "Broken",
    }
}

impl CloneStatus {
    /// A clone holds an assigned account iff its status is neither `Available` nor `Broken`
    pub fn holds_assignment(&self) -> bool {
        !matches!(self, Self::Available | Self::Broken)
    }

    /// Clone status mirroring the status of the account placed in it
    pub fn for_account(status: AccountStatus) -> CloneStatus {
        match status {
            AccountStatus::LoggedIn => Self::LoggedIn,
            AccountStatus::LoginError => Self::LoginError,
            _ => Self::Assigned,
        }
    }

    pub fn display_class(&self) -> &'static str {
        match self {
            Self::Available => "status-neutral",
            Self::Assigned => "status-info",
            Self::LoggedIn => "status-success",
            Self::LoginError | Self::Maintenance => "status-warning",
            Self::Broken => "status-danger",
        }
    }
}

string_enum! {
    /// Last known health of a clone slot
    CloneHealth {
        Working => "Working",
        Broken => "Broken",
        Unknown => "Unknown",
    }
}

impl CloneHealth {
    pub fn display_class(&self) -> &'static str {
        match self {
            Self::Working => "status-success",
            Self::Broken => "status-danger",
            Self::Unknown => "status-muted",
        }
    }
}

string_enum! {
    /// Sharing flag on an account
    Visibility {
        Private => "PRIVATE",
        Shared => "SHARED",
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Private
    }
}

string_enum! {
    /// Classification of an account
    AccountCategory {
        Standard => "standard",
        ManagedTrendFinder => "managed_trend_finder",
    }
}
