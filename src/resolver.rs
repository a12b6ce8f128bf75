// Author: Dustin Pilgrim
// License: MIT

use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::HoconError;
use crate::ast::{Map, Substitution, Value};

/// Replace every substitution in `root` with the value its path names.
///
/// Lookups always go against the complete document, so declaration order
/// does not matter. A path resolves to the same shared container wherever it
/// is referenced. Optional substitutions that find nothing drop their field
/// (or array element); required ones fail the whole resolution.
pub fn resolve_document(root: &Map) -> Result<Map, HoconError> {
    let mut resolver = Resolver::new(root);
    let mut resolved = Map::with_capacity(root.len());

    for (key, value) in root {
        if let Some(v) = resolver.resolve_at(vec![key.clone()], value)? {
            resolved.insert(key.clone(), v);
        }
    }

    Ok(resolved)
}

struct Resolver<'a> {
    root: &'a Map,
    memo: HashMap<Vec<String>, Option<Value>>,
    in_progress: HashSet<Vec<String>>,
    active: Vec<&'a Substitution>,
}

impl<'a> Resolver<'a> {
    fn new(root: &'a Map) -> Self {
        Self {
            root,
            memo: HashMap::new(),
            in_progress: HashSet::new(),
            active: Vec::new(),
        }
    }

    /// Resolve the raw `value` that lives at `path`, once.
    fn resolve_at(&mut self, path: Vec<String>, value: &'a Value) -> Result<Option<Value>, HoconError> {
        if let Some(done) = self.memo.get(&path) {
            return Ok(done.clone());
        }
        if !self.in_progress.insert(path.clone()) {
            return Err(self.cycle_error(&path));
        }

        let result = self.resolve_value(Some(path.as_slice()), value);
        self.in_progress.remove(&path);

        let resolved = result?;
        self.memo.insert(path, resolved.clone());
        Ok(resolved)
    }

    /// `path` is `None` for values that cannot be addressed, i.e. anything inside an array.
    fn resolve_value(&mut self, path: Option<&[String]>, value: &'a Value) -> Result<Option<Value>, HoconError> {
        match value {
            Value::Substitution(sub) => self.substitute(sub),
            Value::Object(items) => {
                let mut out = Map::with_capacity(items.len());
                for (key, child) in items.iter() {
                    let resolved = match path {
                        Some(parent) => {
                            let mut child_path = parent.to_vec();
                            child_path.push(key.clone());
                            self.resolve_at(child_path, child)?
                        }
                        None => self.resolve_value(None, child)?,
                    };
                    if let Some(v) = resolved {
                        out.insert(key.clone(), v);
                    }
                }
                Ok(Some(Value::object(out)))
            }
            Value::Array(values) => {
                let mut out = Vec::with_capacity(values.len());
                for element in values.iter() {
                    if let Some(v) = self.resolve_value(None, element)? {
                        out.push(v);
                    }
                }
                Ok(Some(Value::array(out)))
            }
            Value::String(_)
            | Value::Int(_)
            | Value::Float32(_)
            | Value::Boolean(_)
            | Value::Null => Ok(Some(value.clone())),
        }
    }

    fn substitute(&mut self, sub: &'a Substitution) -> Result<Option<Value>, HoconError> {
        self.active.push(sub);
        let found = self.lookup(&sub.path);
        self.active.pop();

        match found? {
            Some(value) => {
                trace!(path = %sub.path, kind = ?value.kind(), "resolved substitution");
                Ok(Some(value))
            }
            None if sub.optional => {
                debug!(path = %sub.path, "optional substitution not found, dropping field");
                Ok(None)
            }
            None => Err(HoconError::SubstitutionError {
                message: format!("could not resolve substitution: {} to a value", sub),
                line: sub.line,
                column: sub.column,
                hint: Some(format!("Define '{}' or use ${{?{}}} to make it optional", sub.path, sub.path)),
                code: Some(242),
            }),
        }
    }

    /// Find the resolved value at a dotted path.
    ///
    /// Walks raw objects while it can so that a field may reference a sibling
    /// inside the object currently being resolved. The first non-object (or
    /// the target itself) is resolved and the rest of the path is looked up
    /// in the result.
    fn lookup(&mut self, path: &str) -> Result<Option<Value>, HoconError> {
        let segments: Vec<String> = path.split('.').map(String::from).collect();
        let mut raw: &'a Map = self.root;

        for (i, seg) in segments.iter().enumerate() {
            let Some(value) = raw.get(seg) else {
                return Ok(None);
            };
            let here = segments[..=i].to_vec();
            let last = i + 1 == segments.len();

            match value {
                Value::Object(items) if !last && !self.memo.contains_key(&here) => raw = &**items,
                _ => {
                    let resolved = self.resolve_at(here, value)?;
                    return Ok(resolved.and_then(|v| v.lookup(&segments[i + 1..]).cloned()));
                }
            }
        }

        Ok(None)
    }

    fn cycle_error(&self, path: &[String]) -> HoconError {
        let (line, column) = self
            .active
            .last()
            .map(|sub| (sub.line, sub.column))
            .unwrap_or((0, 0));
        HoconError::SubstitutionError {
            message: format!("substitution cycle through '{}'", path.join(".")),
            line,
            column,
            hint: Some("A value cannot refer to itself, directly or through other substitutions".into()),
            code: Some(243),
        }
    }
}
