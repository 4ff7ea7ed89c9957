//! Defines helper macros for generating domain port error enums.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            pub const fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
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
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum StorageProbeError {
            Unreachable { message: String } => "unreachable: {message}",
            Timeout { millis: u64 } => "timed out after {millis}ms",
            Rejected { message: String, attempts: u32 } => "rejected: {message} after {attempts}",
            Conflict => "conflict",
        }
    }

    #[test]
    fn string_fields_accept_borrowed_input() {
        assert_eq!(StorageProbeError::unreachable("refused").to_string(), "unreachable: refused");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        assert_eq!(StorageProbeError::timeout(250_u64).to_string(), "timed out after 250ms");
    }

    #[test]
    fn mixed_fields_are_positional() {
        let err = StorageProbeError::rejected("busy", 3_u32);
        assert_eq!(err.to_string(), "rejected: busy after 3");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(StorageProbeError::conflict(), StorageProbeError::Conflict);
    }
}
