//! Dynamic value representation compared by the engine
//!
//! Rust has no ambient runtime reflection, so the engine operates on [`Value`],
//! a dynamic representation of the data being compared. Scalars are stored
//! inline; sequences, maps and composites are `Rc`-backed so that cloning a
//! value preserves identity ([`ObjectId`]) and aliased or cyclic graphs can be
//! expressed. Aggregate contents sit behind `RefCell` so callers can tie
//! reference cycles after construction.

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::member::MemberRecord;

/// Depth cap for canonical rendering; deeper structure is elided as `…`.
const REPR_DEPTH_LIMIT: usize = 8;

/// Identity of an aggregate value, derived from its allocation address.
///
/// Two `Value` handles share an `ObjectId` iff they alias the same underlying
/// sequence/map/composite. Scalars have no identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Structural classification of a value, used for differ dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Category {
    /// Null/missing value
    Absent,
    /// Atomic value compared by equality (scalars, dates)
    Value,
    /// Ordered, duplicate-permitting collection
    Sequence,
    /// Key/value associative collection with unique keys
    Map,
    /// Structured record with named members
    Composite,
}

impl Category {
    /// Classify a single value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Absent => Category::Absent,
            Value::Bool(_)
            | Value::Int(_)
            | Value::Float(_)
            | Value::Text(_)
            | Value::Timestamp(_) => Category::Value,
            Value::Sequence(_) => Category::Sequence,
            Value::Map(_) => Category::Map,
            Value::Composite(_) => Category::Composite,
        }
    }

    /// Classify a working/base pair, favoring the non-absent side.
    pub fn of_pair(working: &Value, base: &Value) -> Self {
        if !working.is_absent() {
            Category::of(working)
        } else {
            Category::of(base)
        }
    }

    /// True for structurally descendable categories.
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Category::Sequence | Category::Map | Category::Composite)
    }
}

/// A dynamic value in the comparison graph.
#[derive(Clone)]
pub enum Value {
    /// Null/missing
    Absent,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    Sequence(Rc<SequenceValue>),
    Map(Rc<MapValue>),
    Composite(Rc<CompositeValue>),
}

impl Value {
    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Build a sequence from elements.
    pub fn sequence(elements: Vec<Value>) -> Self {
        Value::Sequence(Rc::new(SequenceValue::new(elements)))
    }

    /// Build a map from key/value entries (later duplicates replace earlier ones).
    pub fn map(entries: Vec<(Value, Value)>) -> Self {
        let map = MapValue::new(Vec::new());
        for (k, v) in entries {
            map.insert(k, v);
        }
        Value::Map(Rc::new(map))
    }

    /// Build a composite record with a type name and named members.
    pub fn composite(type_name: impl Into<String>, members: Vec<MemberRecord>) -> Self {
        Value::Composite(Rc::new(CompositeValue::new(type_name, members)))
    }

    /// Convert a `serde_json::Value` into a comparable value tree.
    ///
    /// JSON objects become `Map` category values with text keys; arrays become
    /// sequences; `null` becomes `Absent`.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Absent,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Text(s.clone()),
            serde_json::Value::Array(items) => {
                Value::sequence(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(fields) => Value::map(
                fields
                    .iter()
                    .map(|(k, v)| (Value::text(k.clone()), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// True if this value is null/missing.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    /// Structural category of this value.
    pub fn category(&self) -> Category {
        Category::of(self)
    }

    /// Runtime type name, used for dispatch and policy lookups.
    pub fn type_name(&self) -> String {
        match self {
            Value::Absent => "absent".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Text(_) => "text".to_string(),
            Value::Timestamp(_) => "timestamp".to_string(),
            Value::Sequence(_) => "sequence".to_string(),
            Value::Map(_) => "map".to_string(),
            Value::Composite(c) => c.type_name().to_string(),
        }
    }

    /// Identity of this value, if it is an aggregate.
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            Value::Sequence(rc) => Some(ObjectId(Rc::as_ptr(rc) as usize)),
            Value::Map(rc) => Some(ObjectId(Rc::as_ptr(rc) as usize)),
            Value::Composite(rc) => Some(ObjectId(Rc::as_ptr(rc) as usize)),
            _ => None,
        }
    }

    /// True for the zero-like default of a primitive scalar (`false`, `0`, `0.0`).
    pub fn is_zero_default(&self) -> bool {
        match self {
            Value::Bool(b) => !b,
            Value::Int(i) => *i == 0,
            Value::Float(f) => *f == 0.0,
            _ => false,
        }
    }

    /// Canonical textual representation, used in rendered paths and reports.
    ///
    /// Text renders bare except as a composite member value, where it is
    /// single-quoted (`Location{address='a'}`). Sequences render `[a, b]`,
    /// maps `{k=v}`. Rendering is depth-limited so cyclic values terminate.
    pub fn canonical_repr(&self) -> String {
        let mut out = String::new();
        write_repr(self, &mut out, 0, false);
        out
    }
}

fn write_repr(value: &Value, out: &mut String, depth: usize, quote_text: bool) {
    if depth > REPR_DEPTH_LIMIT {
        out.push('…');
        return;
    }
    match value {
        Value::Absent => {}
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Int(i) => out.push_str(&i.to_string()),
        Value::Float(f) => out.push_str(&f.to_string()),
        Value::Text(s) => {
            if quote_text {
                out.push('\'');
                out.push_str(s);
                out.push('\'');
            } else {
                out.push_str(s);
            }
        }
        Value::Timestamp(ts) => out.push_str(&ts.to_rfc3339()),
        Value::Sequence(seq) => {
            out.push('[');
            for (i, element) in seq.elements().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(element, out, depth + 1, false);
            }
            out.push(']');
        }
        Value::Map(map) => {
            out.push('{');
            for (i, (key, val)) in map.entries().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(key, out, depth + 1, false);
                out.push('=');
                write_repr(val, out, depth + 1, false);
            }
            out.push('}');
        }
        Value::Composite(composite) => {
            out.push_str(composite.type_name());
            out.push('{');
            for (i, member) in composite.members().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(&member.name);
                out.push('=');
                write_repr(&member.value, out, depth + 1, true);
            }
            out.push('}');
        }
    }
}

impl PartialEq for Value {
    /// Deep structural equality. Aliased aggregates short-circuit on pointer
    /// identity; composite/map comparison is member/key-based, not positional.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Absent, Value::Absent) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => {
                Rc::ptr_eq(a, b) || a.elements() == b.elements()
            }
            (Value::Map(a), Value::Map(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                let entries_a = a.entries();
                let entries_b = b.entries();
                entries_a.len() == entries_b.len()
                    && entries_a.iter().all(|(key, val)| {
                        entries_b.iter().any(|(k, v)| k == key && v == val)
                    })
            }
            (Value::Composite(a), Value::Composite(b)) => {
                if Rc::ptr_eq(a, b) {
                    return true;
                }
                if a.type_name() != b.type_name() {
                    return false;
                }
                let members_a = a.members();
                members_a.len() == b.members().len()
                    && members_a
                        .iter()
                        .all(|m| b.member(&m.name).is_some_and(|other| other.value == m.value))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Absent => write!(f, "Absent"),
            Value::Bool(b) => write!(f, "Bool({})", b),
            Value::Int(i) => write!(f, "Int({})", i),
            Value::Float(x) => write!(f, "Float({})", x),
            Value::Text(s) => write!(f, "Text({:?})", s),
            Value::Timestamp(ts) => write!(f, "Timestamp({})", ts.to_rfc3339()),
            // Cycle-safe: canonical rendering is depth-limited
            aggregate => write!(f, "{}", aggregate.canonical_repr()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(ts: DateTime<Utc>) -> Self {
        Value::Timestamp(ts)
    }
}

/// Ordered, duplicate-permitting collection of values.
pub struct SequenceValue {
    elements: RefCell<Vec<Value>>,
}

impl SequenceValue {
    /// Create a sequence from the given elements.
    pub fn new(elements: Vec<Value>) -> Self {
        Self {
            elements: RefCell::new(elements),
        }
    }

    /// Append an element.
    pub fn push(&self, element: Value) {
        self.elements.borrow_mut().push(element);
    }

    /// Snapshot of the current elements.
    pub fn elements(&self) -> Vec<Value> {
        self.elements.borrow().clone()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    /// True if the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }
}

impl fmt::Debug for SequenceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SequenceValue(len={})", self.len())
    }
}

/// Key/value associative collection; keys are unique by value equality.
pub struct MapValue {
    entries: RefCell<Vec<(Value, Value)>>,
}

impl MapValue {
    /// Create a map from the given entries (assumed unique keys).
    pub fn new(entries: Vec<(Value, Value)>) -> Self {
        Self {
            entries: RefCell::new(entries),
        }
    }

    /// Insert an entry, replacing any existing entry with an equal key.
    pub fn insert(&self, key: Value, value: Value) {
        let mut entries = self.entries.borrow_mut();
        if let Some(entry) = entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            entries.push((key, value));
        }
    }

    /// Look up the value stored under an equal key.
    pub fn get(&self, key: &Value) -> Option<Value> {
        self.entries
            .borrow()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }

    /// Snapshot of the current entries in insertion order.
    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.entries.borrow().clone()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl fmt::Debug for MapValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MapValue(len={})", self.len())
    }
}

/// Structured record: a named type with named, metadata-carrying members.
///
/// This is the "explicit schema registration" substitution for host-language
/// reflection: the member list is the record's introspectible schema.
pub struct CompositeValue {
    type_name: String,
    members: RefCell<Vec<MemberRecord>>,
}

impl CompositeValue {
    /// Create a composite with the given type name and members.
    pub fn new(type_name: impl Into<String>, members: Vec<MemberRecord>) -> Self {
        Self {
            type_name: type_name.into(),
            members: RefCell::new(members),
        }
    }

    /// The record's type name.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Set a member, replacing any existing member of the same name.
    ///
    /// This is also how reference cycles are tied after construction.
    pub fn set_member(&self, member: MemberRecord) {
        let mut members = self.members.borrow_mut();
        if let Some(existing) = members.iter_mut().find(|m| m.name == member.name) {
            *existing = member;
        } else {
            members.push(member);
        }
    }

    /// Look up a member by name.
    pub fn member(&self, name: &str) -> Option<MemberRecord> {
        self.members
            .borrow()
            .iter()
            .find(|m| m.name == name)
            .cloned()
    }

    /// Snapshot of the members in declaration order.
    pub fn members(&self) -> Vec<MemberRecord> {
        self.members.borrow().clone()
    }
}

impl fmt::Debug for CompositeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CompositeValue(type={}, members={})",
            self.type_name,
            self.members.borrow().len()
        )
    }
}
