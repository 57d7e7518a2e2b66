// Response shapes.
//
// A shape declares how a 200 response body is interpreted: discarded,
// decoded as one record, or decoded as an ordered list of records.
// Each resource method names its shape as a type parameter, so the
// return type is fixed at the call site.

use std::any::type_name;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;

/// Declared structure of a successful response body.
pub trait ResponseShape {
    /// The value handed back to the caller.
    type Output;

    /// Human-readable shape name used in decode errors.
    fn describe() -> String;

    /// Interpret the raw body of a 200 response.
    fn decode(body: &str) -> Result<Self::Output, Error>;
}

/// Body is ignored; success of the exchange is the only signal.
#[derive(Debug)]
pub enum NoBody {}

/// Body is a single JSON object decoded into `T`.
#[derive(Debug)]
pub struct Scalar<T>(PhantomData<fn() -> T>);

/// Body is a JSON array; each element decodes into one `T`, order preserved.
#[derive(Debug)]
pub struct List<T>(PhantomData<fn() -> T>);

/// `a::b::C<d::E>` becomes `C<E>`.
fn short_type_name<T>() -> String {
    let full = type_name::<T>();
    let mut out = String::with_capacity(full.len());
    let mut segment_start = 0;
    for (i, ch) in full.char_indices() {
        if matches!(ch, '<' | '>' | ',' | ' ' | '[' | ']' | ';' | '(' | ')' | '&') {
            out.push_str(last_segment(&full[segment_start..i]));
            out.push(ch);
            segment_start = i + ch.len_utf8();
        }
    }
    out.push_str(last_segment(&full[segment_start..]));
    out
}

fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

impl ResponseShape for NoBody {
    type Output = ();

    fn describe() -> String {
        "no body".into()
    }

    fn decode(_body: &str) -> Result<(), Error> {
        Ok(())
    }
}

impl<T: DeserializeOwned> ResponseShape for Scalar<T> {
    type Output = T;

    fn describe() -> String {
        short_type_name::<T>()
    }

    fn decode(body: &str) -> Result<T, Error> {
        debug!(shape = %Self::describe(), "decoding object");
        serde_json::from_str(body).map_err(|e| Error::Deserialization {
            shape: Self::describe(),
            message: e.to_string(),
            body: body.to_owned(),
        })
    }
}

impl<T: DeserializeOwned> ResponseShape for List<T> {
    type Output = Vec<T>;

    fn describe() -> String {
        format!("[{}]", short_type_name::<T>())
    }

    fn decode(body: &str) -> Result<Vec<T>, Error> {
        let decode_err = |message: String| Error::Deserialization {
            shape: Self::describe(),
            message,
            body: body.to_owned(),
        };

        let elements: Vec<serde_json::Value> =
            serde_json::from_str(body).map_err(|e| decode_err(e.to_string()))?;
        debug!(shape = %Self::describe(), count = elements.len(), "decoding list");

        elements
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                serde_json::from_value(element)
                    .map_err(|e| decode_err(format!("element {index}: {e}")))
            })
            .collect()
    }
}
