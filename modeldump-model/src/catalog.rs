//! Schemas of the site's data model: accounts, finance, messaging,
//! concerns, feedback and site content.
//!
//! `auth.Group` is registered without dump capability, like framework
//! tables that never received the dump mixin.

use serde::{Deserialize, Serialize};

use crate::{EntitySchema, FieldDescriptor as F, SchemaRegistry};

macro_rules! choice_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            /// Stored labels, in declaration order.
            pub fn labels() -> Vec<&'static str> {
                Self::ALL.iter().map(|v| v.as_str()).collect()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

choice_enum!(UserGender { Male => "M", Female => "F", Other => "O" });

choice_enum!(MessageCategory {
    General => "General",
    Payment => "Payment",
    Maintenance => "Maintenance",
    Promotion => "Promotion",
    Warning => "Warning",
    Other => "Other",
});

choice_enum!(ConcernStatus {
    Open => "Open",
    InProgress => "In Progress",
    Resolved => "Resolved",
    Closed => "Closed",
});

choice_enum!(UtilityName {
    Currency => "Currency",
    LibraryOpeningHours => "Library Opening Hours",
    LibraryClosingHours => "Library Closing Hours",
    BooksBorrowingLimit => "Books borrowing limit",
});

choice_enum!(TransactionMeans {
    Cash => "Cash",
    Mpesa => "M-PESA",
    Bank => "Bank",
    Other => "Other",
});

choice_enum!(TransactionType {
    Deposit => "Deposit",
    Payment => "Payment",
    Refund => "Refund",
});

choice_enum!(FeedbackRate {
    Excellent => "Excellent",
    Good => "Good",
    Average => "Average",
    Poor => "Poor",
    Terrible => "Terrible",
});

choice_enum!(SenderRole {
    Visitor => "Visitor",
    Customer => "Customer",
    Manager => "Manager",
    Founder => "Founder",
    Investor => "Investor",
});

choice_enum!(DocumentName {
    TermsOfUse => "Terms of Service",
    PrivacyPolicy => "Privacy Policy",
    CookiePolicy => "Cookie Policy",
    OurStory => "Our story",
});

pub const USER: &str = "users.User";
pub const AUTH_GROUP: &str = "auth.Group";
pub const MEMBER_GROUP: &str = "management.MemberGroup";
pub const GROUP_MESSAGE: &str = "management.GroupMessage";
pub const PERSONAL_MESSAGE: &str = "management.PersonalMessage";
pub const CONCERN: &str = "management.Concern";
pub const APP_UTILITY: &str = "management.AppUtility";
pub const TRANSACTION: &str = "finance.Transaction";
pub const SERVICE_FEEDBACK: &str = "external.ServiceFeedback";
pub const DOCUMENT: &str = "external.Document";

pub fn user() -> EntitySchema {
    EntitySchema::new(USER)
        .field(F::scalar("password"))
        .field(F::datetime("last_login"))
        .field(F::scalar("is_superuser"))
        .field(F::scalar("username"))
        .field(F::scalar("first_name"))
        .field(F::scalar("last_name"))
        .field(F::scalar("email"))
        .field(F::scalar("is_staff"))
        .field(F::scalar("is_active"))
        .field(F::datetime("date_joined"))
        .field(F::choice("gender", &UserGender::labels()))
        .field(F::scalar("phone_number"))
        .field(F::scalar("address"))
        .field(F::decimal("account_balance"))
        .field(F::file("profile"))
        .field(F::scalar("token"))
        .field(F::to_many("groups", AUTH_GROUP))
        .field(F::reverse_many("member_groups", MEMBER_GROUP, "members"))
        .field(F::reverse_many("messages", PERSONAL_MESSAGE, "user"))
        .field(F::reverse_many("concerns", CONCERN, "user"))
        .field(F::reverse_many("transactions", TRANSACTION, "user"))
}

pub fn auth_group() -> EntitySchema {
    EntitySchema::new(AUTH_GROUP)
        .field(F::scalar("name"))
        .opaque()
}

pub fn member_group() -> EntitySchema {
    EntitySchema::new(MEMBER_GROUP)
        .field(F::scalar("name"))
        .field(F::scalar("description"))
        .field(F::scalar("social_media_link"))
        .field(F::to_many("members", USER))
        .field(F::reverse_many("group_messages", GROUP_MESSAGE, "groups"))
}

pub fn group_message() -> EntitySchema {
    EntitySchema::new(GROUP_MESSAGE)
        .field(F::to_many("groups", MEMBER_GROUP))
        .field(F::choice("category", &MessageCategory::labels()))
        .field(F::scalar("subject"))
        .field(F::scalar("content"))
        .field(F::to_many("read_by", USER))
        .field(F::datetime("created_at"))
        .field(F::datetime("updated_at"))
}

pub fn personal_message() -> EntitySchema {
    EntitySchema::new(PERSONAL_MESSAGE)
        .field(F::to_one("user", USER))
        .field(F::choice("category", &MessageCategory::labels()))
        .field(F::scalar("subject"))
        .field(F::scalar("content"))
        .field(F::scalar("is_read"))
        .field(F::datetime("created_at"))
        .field(F::datetime("updated_at"))
}

pub fn concern() -> EntitySchema {
    EntitySchema::new(CONCERN)
        .field(F::to_one("user", USER))
        .field(F::scalar("about"))
        .field(F::scalar("details"))
        .field(F::scalar("response"))
        .field(F::choice("status", &ConcernStatus::labels()))
        .field(F::datetime("updated_at"))
        .field(F::datetime("created_at"))
}

pub fn app_utility() -> EntitySchema {
    EntitySchema::new(APP_UTILITY)
        .field(F::choice("name", &UtilityName::labels()))
        .field(F::scalar("description"))
        .field(F::scalar("value"))
        .field(F::datetime("updated_at"))
        .field(F::datetime("created_at"))
}

pub fn transaction() -> EntitySchema {
    EntitySchema::new(TRANSACTION)
        .field(F::to_one("user", USER))
        .field(F::choice("type", &TransactionType::labels()))
        .field(F::decimal("amount"))
        .field(F::choice("means", &TransactionMeans::labels()))
        .field(F::scalar("reference"))
        .field(F::scalar("notes"))
        .field(F::json("metadata"))
        .field(F::datetime("created_at"))
        .field(F::datetime("updated_at"))
}

pub fn service_feedback() -> EntitySchema {
    EntitySchema::new(SERVICE_FEEDBACK)
        .field(F::scalar("sender_name"))
        .field(F::choice("sender_role", &SenderRole::labels()))
        .field(F::file("sender_image"))
        .field(F::scalar("message"))
        .field(F::choice("rate", &FeedbackRate::labels()))
        .field(F::scalar("show_in_index"))
        .field(F::datetime("created_at"))
        .field(F::datetime("updated_at"))
}

pub fn document() -> EntitySchema {
    EntitySchema::new(DOCUMENT)
        .field(F::choice("name", &DocumentName::labels()))
        .field(F::scalar("content"))
        .field(F::date("effective_from"))
        .field(F::datetime("updated_at"))
}

/// Every schema of the site model, ready for a [`Store`](crate::Store).
pub fn site_registry() -> SchemaRegistry {
    SchemaRegistry::new()
        .with(user())
        .with(auth_group())
        .with(member_group())
        .with(group_message())
        .with(personal_message())
        .with(concern())
        .with(app_utility())
        .with(transaction())
        .with(service_feedback())
        .with(document())
}
