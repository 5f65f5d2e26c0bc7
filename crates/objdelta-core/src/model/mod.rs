//! Dynamic value model for the differencing engine

pub mod member;
pub mod value;

pub use member::MemberRecord;
pub use value::{Category, CompositeValue, MapValue, ObjectId, SequenceValue, Value};
