//! Helper macro for generating port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! fields accept anything convertible with `Into`.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* }) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);)*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    use super::super::{CustomerRepositoryError, OrderRepositoryError};

    define_port_error! {
        pub enum BatchPortError {
            Rejected { row: u32, message: String } => "row {row} rejected: {message}",
            Timeout => "batch timed out",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = CustomerRepositoryError::duplicate_id("customers_customer_id_key");
        assert_eq!(
            err.to_string(),
            "duplicate customer id: customers_customer_id_key"
        );
    }

    #[test]
    fn constructors_keep_variant_identity() {
        let err = OrderRepositoryError::conflict("orders_reference_key");
        assert!(matches!(err, OrderRepositoryError::Conflict { .. }));
    }

    #[test]
    fn constructors_support_mixed_and_unit_variants() {
        assert_eq!(
            BatchPortError::rejected(3_u32, "bad").to_string(),
            "row 3 rejected: bad"
        );
        assert_eq!(BatchPortError::timeout(), BatchPortError::Timeout);
    }
}
