//! Value objects - immutable types that represent domain concepts

mod api_key;
mod phone_number;

pub use api_key::{
    derive_api_key, generate_api_key, is_well_formed as is_well_formed_api_key, unique_seed,
    API_KEY_LENGTH,
};
pub use phone_number::{PhoneNumber, PhoneNumberError};
