//! # Tax Code Encoder
//!
//! Composes the 16 characters of a tax code from a [`Person`]:
//!
//! 1. family name fragment, given name fragment ([`crate::name`])
//! 2. two-digit year, month letter, day (+40 for women) ([`crate::date`])
//! 3. place code resolved through the [`PlaceRegistry`]
//! 4. control character over the first 15 characters ([`crate::checksum`])
//!
//! The encoder performs no input validation beyond what the place lookup
//! implies; blank names or future dates are the caller's concern.

use std::sync::Arc;

use crate::checksum;
use crate::date::encode_date;
use crate::error::CodecError;
use crate::name::{family_name_code, given_name_code};
use crate::person::{Person, TaxCode, TAX_CODE_LEN};
use crate::place::PlaceRegistry;

/// Stateless encoder over a shared place registry.
#[derive(Debug, Clone)]
pub struct TaxCodeEncoder {
    registry: Arc<PlaceRegistry>,
}

impl TaxCodeEncoder {
    /// Create an encoder reading from `registry`.
    pub fn new(registry: Arc<PlaceRegistry>) -> Self {
        Self { registry }
    }

    /// Compute the tax code of `person`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::PlaceNotFound`] when the birth place and
    /// province pair is not in the registry.
    pub fn encode(&self, person: &Person) -> Result<TaxCode, CodecError> {
        let place = self
            .registry
            .lookup_by_place(&person.birth_place, &person.birth_province)?;

        let mut code = String::with_capacity(TAX_CODE_LEN);
        code.push_str(&family_name_code(&person.family_name));
        code.push_str(&given_name_code(&person.given_name));
        code.push_str(&encode_date(person.birth_date, person.sex));
        code.push_str(place.code());
        code.push(checksum::compute(&code)?);

        tracing::trace!(code = %code, "encoded tax code");
        Ok(TaxCode::new(code)?)
    }
}
