//! Built-in [`Model`] conversions for common standard-library and `serde_json` types.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use indexmap::IndexMap;

use super::{Model, Number, Value};

macro_rules! impl_model_int {
    ($($t:ty),*) => {
        $(impl Model for $t {
            fn to_value(&self) -> Value {
                Value::Number(Number::I64(*self as i64))
            }
        })*
    };
}

macro_rules! impl_model_uint {
    ($($t:ty),*) => {
        $(impl Model for $t {
            fn to_value(&self) -> Value {
                Value::Number(Number::U64(*self as u64))
            }
        })*
    };
}

impl_model_int!(i8, i16, i32, i64, isize);
impl_model_uint!(u8, u16, u32, u64, usize);

impl Model for f32 {
    fn to_value(&self) -> Value {
        Value::Number(Number::F64(*self as f64))
    }
}

impl Model for f64 {
    fn to_value(&self) -> Value {
        Value::Number(Number::F64(*self))
    }
}

impl Model for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl Model for str {
    fn to_value(&self) -> Value {
        Value::Str(Rc::from(self))
    }
}

impl Model for String {
    fn to_value(&self) -> Value {
        Value::Str(Rc::from(self.as_str()))
    }
}

impl<T: Model> Model for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: Model> Model for Vec<T> {
    fn to_value(&self) -> Value {
        Value::List(Rc::new(self.iter().map(Model::to_value).collect()))
    }
}

impl<T: Model> Model for [T] {
    fn to_value(&self) -> Value {
        Value::List(Rc::new(self.iter().map(Model::to_value).collect()))
    }
}

impl<T: Model, const N: usize> Model for [T; N] {
    fn to_value(&self) -> Value {
        Value::List(Rc::new(self.iter().map(Model::to_value).collect()))
    }
}

impl<K: AsRef<str>, V: Model> Model for HashMap<K, V> {
    fn to_value(&self) -> Value {
        let mut map = IndexMap::with_capacity(self.len());
        for (k, v) in self {
            map.insert(k.as_ref().to_string(), v.to_value());
        }
        Value::Object(Rc::new(map))
    }
}

impl<K: AsRef<str>, V: Model> Model for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        let mut map = IndexMap::with_capacity(self.len());
        for (k, v) in self {
            map.insert(k.as_ref().to_string(), v.to_value());
        }
        Value::Object(Rc::new(map))
    }
}

impl<K: AsRef<str>, V: Model> Model for IndexMap<K, V> {
    fn to_value(&self) -> Value {
        let mut map = IndexMap::with_capacity(self.len());
        for (k, v) in self {
            map.insert(k.as_ref().to_string(), v.to_value());
        }
        Value::Object(Rc::new(map))
    }
}

impl<A: Model, B: Model> Model for (A, B) {
    fn to_value(&self) -> Value {
        let mut map = IndexMap::with_capacity(2);
        map.insert("0".to_string(), self.0.to_value());
        map.insert("1".to_string(), self.1.to_value());
        Value::Object(Rc::new(map))
    }
}

/// Bridges CLI/JSON data into the value tree: `null`/bool/number/string map
/// directly, arrays become lists, objects become objects (order preserved
/// when `serde_json`'s `preserve_order` feature is enabled, as it is here).
impl Model for serde_json::Value {
    fn to_value(&self) -> Value {
        match self {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Number(Number::I64(i))
                } else if let Some(u) = n.as_u64() {
                    Value::Number(Number::U64(u))
                } else {
                    Value::Number(Number::F64(n.as_f64().unwrap_or(0.0)))
                }
            }
            serde_json::Value::String(s) => Value::Str(Rc::from(s.as_str())),
            serde_json::Value::Array(items) => {
                Value::List(Rc::new(items.iter().map(Model::to_value).collect()))
            }
            serde_json::Value::Object(map) => {
                let mut out = IndexMap::with_capacity(map.len());
                for (k, v) in map {
                    out.insert(k.clone(), v.to_value());
                }
                Value::Object(Rc::new(out))
            }
        }
    }
}
