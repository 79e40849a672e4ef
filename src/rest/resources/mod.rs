//! Standard Salesforce objects.
//!
//! Each type here is a unit struct implementing [`SObjectResource`] against
//! the `v20.0` sObject path of the object it names.
//!
//! ```rust
//! use salesforce_model::rest::SObjectResource;
//! use salesforce_model::rest::resources::{Account, Opportunity};
//!
//! assert_eq!(Account::OBJECT_PATH, "/services/data/v20.0/sobjects/Account");
//! assert_eq!(Opportunity::PRIMARY_KEY, "Id");
//! ```
//!
//! Custom objects implement the trait the same way:
//!
//! ```rust
//! use salesforce_model::rest::SObjectResource;
//!
//! pub struct Invoice;
//!
//! impl SObjectResource for Invoice {
//!     const OBJECT_PATH: &'static str = "/services/data/v20.0/sobjects/Invoice__c";
//! }
//! ```

use crate::rest::SObjectResource;

macro_rules! sobject {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl SObjectResource for $name {
            const OBJECT_PATH: &'static str =
                concat!("/services/data/v20.0/sobjects/", stringify!($name));
        }
    };
}

sobject!(
    /// A business or organization.
    Account
);
sobject!(
    /// A person associated with an account.
    Contact
);
sobject!(
    /// A prospect not yet qualified as an opportunity.
    Lead
);
sobject!(
    /// A pending deal.
    Opportunity
);
sobject!(
    /// A customer issue.
    Case
);
sobject!(
    /// A user of the org.
    User
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_paths() {
        assert_eq!(Account::OBJECT_PATH, "/services/data/v20.0/sobjects/Account");
        assert_eq!(Contact::OBJECT_PATH, "/services/data/v20.0/sobjects/Contact");
        assert_eq!(Lead::OBJECT_PATH, "/services/data/v20.0/sobjects/Lead");
        assert_eq!(
            Opportunity::OBJECT_PATH,
            "/services/data/v20.0/sobjects/Opportunity"
        );
        assert_eq!(Case::OBJECT_PATH, "/services/data/v20.0/sobjects/Case");
        assert_eq!(User::OBJECT_PATH, "/services/data/v20.0/sobjects/User");
    }

    #[test]
    fn test_default_primary_key() {
        assert_eq!(Case::PRIMARY_KEY, "Id");
        assert_eq!(User::PRIMARY_KEY, "Id");
    }
}
