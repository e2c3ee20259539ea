//! Tagged models.
//!
//! A [`Model`] is a plain Rust struct whose fields are each annotated with the
//! attribute key they correspond to. Models are usually declared with the
//! [`typed_model!`](crate::typed_model) macro:
//!
//! ```
//! use typed_provider_sdk::typed_model;
//!
//! typed_model! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Subnet {
//!         #[tag("name")]
//!         pub name: String,
//!         #[tag("address_prefixes")]
//!         pub address_prefixes: Option<Vec<String>>,
//!     }
//! }
//! ```
//!
//! The set of declared field types is closed: `String`, `bool`, `i64`, `i32`,
//! `f64`, `f32`, and `Vec`, `Option<Vec>`, `HashMap<String, _>` and
//! `Option<HashMap<String, _>>` of those or of other models. An `Option`
//! collection keeps "never configured" (`None`) apart from "configured as
//! empty" (`Some` of an empty collection).

use crate::error::ModelError;
use crate::schema::Diagnostic;
use crate::value::Value;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The declared kind of a field or element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// A string.
    String,
    /// An integer of any width.
    Int,
    /// A floating-point number of any width.
    Float,
    /// A boolean.
    Bool,
    /// A sequence of the inner kind.
    List(Box<Kind>),
    /// A string-keyed map of the inner kind.
    Map(Box<Kind>),
    /// A nested model.
    Object,
}

impl Kind {
    /// Whether this is one of the four scalar kinds.
    pub fn is_primitive(&self) -> bool {
        matches!(self, Kind::String | Kind::Int | Kind::Float | Kind::Bool)
    }

    fn list_of(self) -> Kind {
        Kind::List(Box::new(self))
    }

    fn map_of(self) -> Kind {
        Kind::Map(Box::new(self))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::String => f.write_str("string"),
            Kind::Int => f.write_str("int"),
            Kind::Float => f.write_str("float"),
            Kind::Bool => f.write_str("bool"),
            Kind::List(inner) => write!(f, "list of {}", inner),
            Kind::Map(inner) => write!(f, "map of {}", inner),
            Kind::Object => f.write_str("object"),
        }
    }
}

/// Why a single field could not be decoded.
///
/// Only a map entry whose value the declared value type cannot hold is soft;
/// every other failure names the field and aborts.
#[derive(Debug)]
pub enum Fault {
    /// Aborts the whole decode.
    Hard(ModelError),
    /// The field is left untouched and a warning is recorded.
    Soft(String),
}

impl From<ModelError> for Fault {
    fn from(err: ModelError) -> Self {
        Fault::Hard(err)
    }
}


/// Tracks the attribute path being decoded and collects soft-fault warnings.
pub struct DecodeContext<'a> {
    path: String,
    warnings: &'a mut Vec<Diagnostic>,
}

impl<'a> DecodeContext<'a> {
    pub(crate) fn new(warnings: &'a mut Vec<Diagnostic>) -> Self {
        Self {
            path: String::new(),
            warnings,
        }
    }

    /// The attribute path of the value being decoded, e.g. `first.0.value`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// A context one segment deeper.
    pub fn child(&mut self, segment: &str) -> DecodeContext<'_> {
        DecodeContext {
            path: join_path(&self.path, segment),
            warnings: &mut *self.warnings,
        }
    }

    pub(crate) fn warn(&mut self, reason: String) {
        self.warnings.push(
            Diagnostic::warning("Attribute skipped while decoding")
                .with_detail(reason)
                .with_attribute(self.path.clone()),
        );
    }

    fn mismatch(&self, expected: Kind, found: &Value) -> ModelError {
        self.mismatch_name(expected, found.type_name())
    }

    fn mismatch_name(&self, expected: Kind, found: &'static str) -> ModelError {
        ModelError::TypeMismatch {
            path: self.path.clone(),
            expected,
            found,
        }
    }
}

/// A type that can appear inside a sequence or map field.
///
/// Implemented for the scalar types and, by [`typed_model!`](crate::typed_model),
/// for every model.
pub trait Element: Sized {
    /// The declared kind.
    fn kind() -> Kind;

    /// Convert to a state value.
    fn to_element(&self, key: &str) -> Result<Value, ModelError>;

    /// Convert from a state value.
    fn from_element(value: Value, cx: &mut DecodeContext<'_>) -> Result<Self, ModelError>;

    /// Check that nested models carry their tags.
    fn check_tags(_path: &str) -> Result<(), ModelError> {
        Ok(())
    }
}

/// A type that can be declared as a model field.
///
/// The `assign_*` methods are chosen by the runtime shape of the state value;
/// each implementation accepts the shapes its declared type can hold.
pub trait FieldType: Sized {
    /// The declared kind.
    fn kind() -> Kind;

    /// Convert the field to a state value.
    fn encode_field(&self, key: &str) -> Result<Value, ModelError>;

    /// Assign from a string, number or bool.
    fn assign_scalar(&mut self, value: Value, cx: &mut DecodeContext<'_>) -> Result<(), Fault> {
        Err(Fault::Hard(cx.mismatch(Self::kind(), &value)))
    }

    /// Assign from a list, or from a set converted to a list.
    fn assign_sequence(
        &mut self,
        _items: Vec<Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        Err(Fault::Hard(cx.mismatch_name(Self::kind(), "list")))
    }

    /// Assign from a map.
    fn assign_map(
        &mut self,
        _entries: BTreeMap<String, Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        Err(Fault::Hard(cx.mismatch_name(Self::kind(), "map")))
    }

    /// Check that models nested in this field carry their tags.
    fn check_tags(_path: &str) -> Result<(), ModelError> {
        Ok(())
    }
}

impl Element for String {
    fn kind() -> Kind {
        Kind::String
    }

    fn to_element(&self, _key: &str) -> Result<Value, ModelError> {
        Ok(Value::String(self.clone()))
    }

    fn from_element(value: Value, cx: &mut DecodeContext<'_>) -> Result<Self, ModelError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(cx.mismatch(Kind::String, &other)),
        }
    }
}

impl Element for bool {
    fn kind() -> Kind {
        Kind::Bool
    }

    fn to_element(&self, _key: &str) -> Result<Value, ModelError> {
        Ok(Value::Bool(*self))
    }

    fn from_element(value: Value, cx: &mut DecodeContext<'_>) -> Result<Self, ModelError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(cx.mismatch(Kind::Bool, &other)),
        }
    }
}

impl Element for i64 {
    fn kind() -> Kind {
        Kind::Int
    }

    fn to_element(&self, _key: &str) -> Result<Value, ModelError> {
        Ok(Value::Int(*self))
    }

    fn from_element(value: Value, cx: &mut DecodeContext<'_>) -> Result<Self, ModelError> {
        match value {
            Value::Int(i) => Ok(i),
            other => Err(cx.mismatch(Kind::Int, &other)),
        }
    }
}

impl Element for i32 {
    fn kind() -> Kind {
        Kind::Int
    }

    fn to_element(&self, _key: &str) -> Result<Value, ModelError> {
        Ok(Value::Int(i64::from(*self)))
    }

    fn from_element(value: Value, cx: &mut DecodeContext<'_>) -> Result<Self, ModelError> {
        match value {
            Value::Int(i) => i32::try_from(i).map_err(|_| ModelError::OutOfRange {
                path: cx.path().to_string(),
                value: i,
                target: "i32",
            }),
            other => Err(cx.mismatch(Kind::Int, &other)),
        }
    }
}

impl Element for f64 {
    fn kind() -> Kind {
        Kind::Float
    }

    fn to_element(&self, _key: &str) -> Result<Value, ModelError> {
        Ok(Value::Float(*self))
    }

    // Integers widen: JSON-sourced state stores whole floats as integers.
    fn from_element(value: Value, cx: &mut DecodeContext<'_>) -> Result<Self, ModelError> {
        match value {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(cx.mismatch(Kind::Float, &other)),
        }
    }
}

impl Element for f32 {
    fn kind() -> Kind {
        Kind::Float
    }

    fn to_element(&self, _key: &str) -> Result<Value, ModelError> {
        Ok(Value::Float(f64::from(*self)))
    }

    fn from_element(value: Value, cx: &mut DecodeContext<'_>) -> Result<Self, ModelError> {
        f64::from_element(value, cx).map(|f| f as f32)
    }
}

// Lists of lists compile but are rejected by the list codec below.
impl<T: Element> Element for Vec<T> {
    fn kind() -> Kind {
        T::kind().list_of()
    }

    fn to_element(&self, key: &str) -> Result<Value, ModelError> {
        encode_list(self, key)
    }

    fn from_element(value: Value, cx: &mut DecodeContext<'_>) -> Result<Self, ModelError> {
        match value {
            Value::List(items) => decode_list(items, cx),
            Value::Set(set) => decode_list(set.into_list(), cx),
            other => Err(cx.mismatch(<Self as Element>::kind(), &other)),
        }
    }
}

macro_rules! scalar_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FieldType for $ty {
                fn kind() -> Kind {
                    <$ty as Element>::kind()
                }

                fn encode_field(&self, key: &str) -> Result<Value, ModelError> {
                    self.to_element(key)
                }

                fn assign_scalar(
                    &mut self,
                    value: Value,
                    cx: &mut DecodeContext<'_>,
                ) -> Result<(), Fault> {
                    *self = <$ty as Element>::from_element(value, cx)?;
                    Ok(())
                }
            }
        )*
    };
}

scalar_field!(String, bool, i64, i32, f64, f32);

fn is_encodable_element(kind: &Kind) -> bool {
    kind.is_primitive() || *kind == Kind::Object
}

fn encode_list<T: Element>(items: &[T], key: &str) -> Result<Value, ModelError> {
    let kind = T::kind();
    if !is_encodable_element(&kind) {
        return Err(ModelError::UnsupportedKind {
            key: key.to_string(),
            kind: kind.list_of(),
        });
    }
    items
        .iter()
        .map(|item| item.to_element(key))
        .collect::<Result<Vec<_>, _>>()
        .map(Value::List)
}

fn decode_list<T: Element>(
    items: Vec<Value>,
    cx: &mut DecodeContext<'_>,
) -> Result<Vec<T>, ModelError> {
    let kind = T::kind();
    if !is_encodable_element(&kind) {
        return Err(ModelError::UnsupportedKind {
            key: cx.path().to_string(),
            kind: kind.list_of(),
        });
    }

    let mut out = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        // empty nested blocks surface as null entries
        if kind == Kind::Object && item.is_null() {
            continue;
        }
        let mut element_cx = cx.child(&index.to_string());
        out.push(T::from_element(item, &mut element_cx)?);
    }
    Ok(out)
}

fn encode_map<T: Element>(entries: &HashMap<String, T>, key: &str) -> Result<Value, ModelError> {
    let kind = T::kind();
    if !is_encodable_element(&kind) {
        return Err(ModelError::UnsupportedKind {
            key: key.to_string(),
            kind: kind.map_of(),
        });
    }
    let mut out = BTreeMap::new();
    for (k, v) in entries {
        out.insert(k.clone(), v.to_element(key)?);
    }
    Ok(Value::Map(out))
}

fn decode_map<T: Element>(
    entries: BTreeMap<String, Value>,
    cx: &mut DecodeContext<'_>,
) -> Result<HashMap<String, T>, Fault> {
    let kind = T::kind();
    if !is_encodable_element(&kind) {
        return Err(Fault::Hard(ModelError::UnsupportedKind {
            key: cx.path().to_string(),
            kind: kind.map_of(),
        }));
    }

    let mut out = HashMap::with_capacity(entries.len());
    for (k, v) in entries {
        let mut entry_cx = cx.child(&k);
        let value = if kind == Kind::Object {
            if !matches!(v, Value::Map(_)) {
                return Err(Fault::Soft(entry_cx.mismatch(Kind::Object, &v).to_string()));
            }
            T::from_element(v, &mut entry_cx)?
        } else {
            T::from_element(v, &mut entry_cx).map_err(|err| Fault::Soft(err.to_string()))?
        };
        out.insert(k, value);
    }
    Ok(out)
}

impl<T: Element> FieldType for Vec<T> {
    fn kind() -> Kind {
        T::kind().list_of()
    }

    fn encode_field(&self, key: &str) -> Result<Value, ModelError> {
        encode_list(self, key)
    }

    fn assign_sequence(&mut self, items: Vec<Value>, cx: &mut DecodeContext<'_>) -> Result<(), Fault> {
        *self = decode_list(items, cx)?;
        Ok(())
    }

    fn check_tags(path: &str) -> Result<(), ModelError> {
        T::check_tags(path)
    }
}

impl<T: Element> FieldType for Option<Vec<T>> {
    fn kind() -> Kind {
        T::kind().list_of()
    }

    fn encode_field(&self, key: &str) -> Result<Value, ModelError> {
        match self {
            Some(items) => encode_list(items, key),
            None => Ok(Value::Null),
        }
    }

    fn assign_sequence(&mut self, items: Vec<Value>, cx: &mut DecodeContext<'_>) -> Result<(), Fault> {
        *self = Some(decode_list(items, cx)?);
        Ok(())
    }

    fn check_tags(path: &str) -> Result<(), ModelError> {
        T::check_tags(path)
    }
}

impl<T: Element> FieldType for HashMap<String, T> {
    fn kind() -> Kind {
        T::kind().map_of()
    }

    fn encode_field(&self, key: &str) -> Result<Value, ModelError> {
        encode_map(self, key)
    }

    fn assign_map(
        &mut self,
        entries: BTreeMap<String, Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        *self = decode_map(entries, cx)?;
        Ok(())
    }

    fn check_tags(path: &str) -> Result<(), ModelError> {
        T::check_tags(path)
    }
}

impl<T: Element> FieldType for Option<HashMap<String, T>> {
    fn kind() -> Kind {
        T::kind().map_of()
    }

    fn encode_field(&self, key: &str) -> Result<Value, ModelError> {
        match self {
            Some(entries) => encode_map(entries, key),
            None => Ok(Value::Null),
        }
    }

    fn assign_map(
        &mut self,
        entries: BTreeMap<String, Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        *self = Some(decode_map(entries, cx)?);
        Ok(())
    }

    fn check_tags(path: &str) -> Result<(), ModelError> {
        T::check_tags(path)
    }
}

/// A struct whose fields map onto attribute keys.
pub trait Model: Default + 'static {
    /// The model's fields, in declaration order.
    fn fields() -> Vec<Field<Self>>;

    /// Name used in error messages.
    fn type_name() -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Describes one field of a model `M`.
pub struct Field<M> {
    name: &'static str,
    tag: Option<&'static str>,
    slot: Box<dyn Slot<M>>,
}

impl<M: 'static> Field<M> {
    /// Describe a field by its Rust name, optional attribute key and accessors.
    pub fn new<T: FieldType + 'static>(
        name: &'static str,
        tag: Option<&'static str>,
        get: fn(&M) -> &T,
        get_mut: fn(&mut M) -> &mut T,
    ) -> Self {
        Self {
            name,
            tag,
            slot: Box::new(Accessor { get, get_mut }),
        }
    }

    /// The Rust field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The attribute key, if the field is tagged.
    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    /// The declared kind.
    pub fn kind(&self) -> Kind {
        self.slot.kind()
    }

    pub(crate) fn encode(&self, model: &M, key: &str) -> Result<Value, ModelError> {
        self.slot.encode(model, key)
    }

    pub(crate) fn assign_scalar(
        &self,
        model: &mut M,
        value: Value,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        self.slot.assign_scalar(model, value, cx)
    }

    pub(crate) fn assign_sequence(
        &self,
        model: &mut M,
        items: Vec<Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        self.slot.assign_sequence(model, items, cx)
    }

    pub(crate) fn assign_map(
        &self,
        model: &mut M,
        entries: BTreeMap<String, Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        self.slot.assign_map(model, entries, cx)
    }

    fn check_tags(&self, path: &str) -> Result<(), ModelError> {
        self.slot.check_tags(path)
    }
}

impl<M> fmt::Debug for Field<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish()
    }
}

trait Slot<M> {
    fn kind(&self) -> Kind;
    fn encode(&self, model: &M, key: &str) -> Result<Value, ModelError>;
    fn assign_scalar(&self, model: &mut M, value: Value, cx: &mut DecodeContext<'_>) -> Result<(), Fault>;
    fn assign_sequence(
        &self,
        model: &mut M,
        items: Vec<Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault>;
    fn assign_map(
        &self,
        model: &mut M,
        entries: BTreeMap<String, Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault>;
    fn check_tags(&self, path: &str) -> Result<(), ModelError>;
}

struct Accessor<M, T> {
    get: fn(&M) -> &T,
    get_mut: fn(&mut M) -> &mut T,
}

impl<M, T: FieldType> Slot<M> for Accessor<M, T> {
    fn kind(&self) -> Kind {
        T::kind()
    }

    fn encode(&self, model: &M, key: &str) -> Result<Value, ModelError> {
        (self.get)(model).encode_field(key)
    }

    fn assign_scalar(&self, model: &mut M, value: Value, cx: &mut DecodeContext<'_>) -> Result<(), Fault> {
        (self.get_mut)(model).assign_scalar(value, cx)
    }

    fn assign_sequence(
        &self,
        model: &mut M,
        items: Vec<Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        (self.get_mut)(model).assign_sequence(items, cx)
    }

    fn assign_map(
        &self,
        model: &mut M,
        entries: BTreeMap<String, Value>,
        cx: &mut DecodeContext<'_>,
    ) -> Result<(), Fault> {
        (self.get_mut)(model).assign_map(entries, cx)
    }

    fn check_tags(&self, path: &str) -> Result<(), ModelError> {
        T::check_tags(path)
    }
}

/// Check that every field reachable from `M` carries an attribute tag.
///
/// Sequence fields are checked element-type first, so the innermost untagged
/// field is the one reported. Run this once per model type when a resource is
/// registered.
pub fn validate<M: Model>() -> Result<(), ModelError> {
    check_model_tags::<M>("")
}

/// Like [`validate`], taking an instance of the model.
pub fn validate_model_object<M: Model>(_model: &M) -> Result<(), ModelError> {
    validate::<M>()
}

/// Tag check for a model nested under `prefix`, used by [`typed_model!`](crate::typed_model).
#[doc(hidden)]
pub fn check_model_tags<M: Model>(prefix: &str) -> Result<(), ModelError> {
    for field in M::fields() {
        let path = join_path(prefix, field.name());
        field.check_tags(&path)?;
        if field.tag().is_none() {
            return Err(ModelError::MissingTag { path });
        }
    }
    Ok(())
}

pub(crate) fn join_path(base: &str, name: &str) -> String {
    if base.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", base, name)
    }
}

/// Declare a struct and implement [`Model`] and [`Element`] for it.
///
/// Each field may carry a `#[tag("attribute_key")]` annotation. Untagged
/// fields are accepted by the macro but rejected by [`validate`]. Doc comments
/// and other field attributes are kept on the generated struct; `tag` is
/// consumed by the macro.
#[macro_export]
macro_rules! typed_model {
    (@tag) => {
        ::core::option::Option::None
    };
    (@tag [tag($tag:literal)] $($rest:tt)*) => {
        ::core::option::Option::Some($tag)
    };
    (@tag [$($other:tt)*] $($rest:tt)*) => {
        $crate::typed_model!(@tag $($rest)*)
    };

    // Each pending field is `{ [attrs] [kept attrs] { declaration } }`.
    (@struct [$($head:tt)*] [$($out:tt)*]) => {
        $($head)* {
            $($out)*
        }
    };
    (@struct [$($head:tt)*] [$($out:tt)*]
        { [$([doc = $doc:literal])*] [] { $($decl:tt)* } }
        $($rest:tt)*
    ) => {
        $crate::typed_model!(@struct [$($head)*] [$($out)* $(#[doc = $doc])* $($decl)*,] $($rest)*);
    };
    (@struct [$($head:tt)*] [$($out:tt)*]
        { [$([doc = $doc:literal])* [tag($tag:literal)] $([doc = $after:literal])*] [] { $($decl:tt)* } }
        $($rest:tt)*
    ) => {
        $crate::typed_model!(
            @struct [$($head)*] [$($out)* $(#[doc = $doc])* $(#[doc = $after])* $($decl)*,] $($rest)*
        );
    };
    (@struct [$($head:tt)*] [$($out:tt)*]
        { [] [$($kept:tt)*] { $($decl:tt)* } }
        $($rest:tt)*
    ) => {
        $crate::typed_model!(@struct [$($head)*] [$($out)* $($kept)* $($decl)*,] $($rest)*);
    };
    (@struct [$($head:tt)*] [$($out:tt)*]
        { [[tag($tag:literal)] $($attrs:tt)*] [$($kept:tt)*] $decl:tt }
        $($rest:tt)*
    ) => {
        $crate::typed_model!(@struct [$($head)*] [$($out)*] { [$($attrs)*] [$($kept)*] $decl } $($rest)*);
    };
    (@struct [$($head:tt)*] [$($out:tt)*]
        { [[$($attr:tt)*] $($attrs:tt)*] [$($kept:tt)*] $decl:tt }
        $($rest:tt)*
    ) => {
        $crate::typed_model!(
            @struct [$($head)*] [$($out)*] { [$($attrs)*] [$($kept)* #[$($attr)*]] $decl } $($rest)*
        );
    };

    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$($fattr:tt)*])*
                $fvis:vis $field:ident : $fty:ty
            ),* $(,)?
        }
    ) => {
        $crate::typed_model!(
            @struct [$(#[$meta])* $vis struct $name] []
            $( { [$([$($fattr)*])*] [] { $fvis $field: $fty } } )*
        );

        impl $crate::model::Model for $name {
            fn fields() -> ::std::vec::Vec<$crate::model::Field<Self>> {
                ::std::vec![
                    $(
                        $crate::model::Field::<Self>::new(
                            ::core::stringify!($field),
                            $crate::typed_model!(@tag $([$($fattr)*])*),
                            |m| &m.$field,
                            |m| &mut m.$field,
                        ),
                    )*
                ]
            }
        }

        impl $crate::model::Element for $name {
            fn kind() -> $crate::model::Kind {
                $crate::model::Kind::Object
            }

            fn to_element(
                &self,
                _key: &str,
            ) -> ::core::result::Result<$crate::value::Value, $crate::error::ModelError> {
                $crate::encode::marshal(self).map($crate::value::Value::Map)
            }

            fn from_element(
                value: $crate::value::Value,
                cx: &mut $crate::model::DecodeContext<'_>,
            ) -> ::core::result::Result<Self, $crate::error::ModelError> {
                $crate::decode::decode_element(value, cx)
            }

            fn check_tags(path: &str) -> ::core::result::Result<(), $crate::error::ModelError> {
                $crate::model::check_model_tags::<Self>(path)
            }
        }
    };
}
