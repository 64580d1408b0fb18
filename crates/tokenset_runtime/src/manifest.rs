//! TOML manifests declaring token types and containers.
//!
//! ```toml
//! [[token_types]]
//! path = "app::Field"
//! attributes = [
//!     { name = "prefix" },
//!     { name = "stuff", description = "What the field holds", default = "" },
//! ]
//!
//! [[containers]]
//! path = "app::Fields"
//! token_type = "app::Field"
//! prefix = "app"
//! documentation_columns = ["name", "stuff"]
//! documentation_sort = "stuff"
//!
//! [[containers.tokens]]
//! name = "foo"
//! fields = { stuff = "Hello" }
//! ```
//!
//! Declarations are bound in file order, so `extends` may only name token
//! types and containers declared earlier. Attributes declared in a manifest
//! carry descriptions and defaults; derivation functions only exist in code.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tokenset_core::{
    AttributeSpec, BASE_TYPE_PATH, Container, ContainerConfig, SortKey, Token, TokenSnapshot,
    TokenType, Value,
};
use tokenset_foundation::{Error, ErrorContext, ErrorKind, NameMap, Result};

/// A parsed manifest, not yet bound.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Token type declarations in order.
    #[serde(default)]
    pub token_types: Vec<TokenTypeDecl>,
    /// Container declarations in order.
    #[serde(default)]
    pub containers: Vec<ContainerDecl>,
    #[serde(skip)]
    source: Option<String>,
}

/// Declaration of a token type.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenTypeDecl {
    /// Type path.
    pub path: String,
    /// Earlier token types to inherit attributes from.
    #[serde(default)]
    pub extends: Vec<String>,
    /// Attribute declarations in order.
    #[serde(default)]
    pub attributes: Vec<AttributeDecl>,
}

/// Declaration of one attribute.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AttributeDecl {
    /// Field name.
    pub name: String,
    /// Human-readable description.
    pub description: Option<String>,
    /// Default value.
    pub default: Option<toml::Value>,
}

/// Declaration of a container.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContainerDecl {
    /// Container path.
    pub path: String,
    /// Earlier containers to inherit tokens from.
    #[serde(default)]
    pub extends: Vec<String>,
    /// Type of tokens declared without their own `type`; the base type if unset.
    pub token_type: Option<String>,
    /// Prefix injected into every token.
    pub prefix: Option<String>,
    /// Documentation columns.
    pub documentation_columns: Option<Vec<String>>,
    /// Field to sort documentation by.
    pub documentation_sort: Option<String>,
    /// Token declarations in order.
    #[serde(default)]
    pub tokens: Vec<TokenDecl>,
}

/// Declaration of one token inside a container.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TokenDecl {
    /// Declaration-site name.
    pub name: String,
    /// Token type, overriding the container's.
    #[serde(rename = "type")]
    pub token_type: Option<String>,
    /// Replace an inherited token of the same name.
    #[serde(default, rename = "override")]
    pub overriding: bool,
    /// Field values.
    #[serde(default)]
    pub fields: toml::Table,
    /// Fields to fill through `derive_if_requested`.
    #[serde(default)]
    pub request: Vec<String>,
}

impl FromStr for Manifest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| Error::new(ErrorKind::ManifestError(e.to_string())))
    }
}

impl Manifest {
    /// Reads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid manifest.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to read manifest '{}': {e}",
                path.display()
            )))
        })?;
        let mut manifest: Manifest = text
            .parse()
            .map_err(|e: Error| e.with_context(ErrorContext::new().with_source(path.display().to_string())))?;
        manifest.source = Some(path.display().to_string());
        tracing::info!(
            manifest = %path.display(),
            token_types = manifest.token_types.len(),
            containers = manifest.containers.len(),
            "manifest loaded"
        );
        Ok(manifest)
    }

    /// Binds every declaration in order.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` for references to undeclared types or
    /// containers and for paths declared twice, and any binding error a
    /// container raises.
    pub fn build(&self) -> Result<Registry> {
        let mut registry = Registry::default();

        for decl in &self.token_types {
            if registry.types.contains_key(&decl.path) {
                let err = Error::new(ErrorKind::ManifestError(format!(
                    "duplicate token type: {}",
                    decl.path
                )));
                return Err(self.locate(err, format!("token type {}", decl.path)));
            }
            let ty = self
                .build_type(decl, &registry)
                .map_err(|e| self.locate(e, format!("token type {}", decl.path)))?;
            tracing::debug!(token_type = %decl.path, attributes = ty.attribute_names().len(), "token type declared");
            registry.types.insert(decl.path.as_str(), ty);
        }

        for decl in &self.containers {
            if registry.containers.contains_key(&decl.path) {
                let err = Error::new(ErrorKind::ManifestError(format!(
                    "duplicate container: {}",
                    decl.path
                )));
                return Err(self.locate(err, format!("container {}", decl.path)));
            }
            let container = self
                .build_container(decl, &registry)
                .map_err(|e| self.locate(e, format!("container {}", decl.path)))?;
            registry.containers.insert(decl.path.as_str(), container);
        }

        Ok(registry)
    }

    fn locate(&self, err: Error, frame: String) -> Error {
        let context = err.context.clone().unwrap_or_default();
        let context = match (&context.source, &self.source) {
            (None, Some(source)) => context.with_source(source.clone()),
            _ => context,
        };
        err.with_context(context.with_frame(frame))
    }

    fn build_type(&self, decl: &TokenTypeDecl, registry: &Registry) -> Result<Arc<TokenType>> {
        let mut builder = TokenType::define(decl.path.as_str());
        for parent in &decl.extends {
            builder = builder.extends(registry.resolve_type(parent)?);
        }
        for attr in &decl.attributes {
            let mut spec = AttributeSpec::new();
            if let Some(description) = &attr.description {
                spec = spec.describe(description.as_str());
            }
            if let Some(default) = &attr.default {
                spec = spec.with_default(to_value(default.clone()));
            }
            builder = builder.attribute(attr.name.as_str(), spec);
        }
        Ok(builder.build())
    }

    fn build_container(&self, decl: &ContainerDecl, registry: &Registry) -> Result<Arc<Container>> {
        let mut config = ContainerConfig::new();
        if let Some(prefix) = &decl.prefix {
            config = config.with_prefix(prefix.as_str());
        }
        if let Some(columns) = &decl.documentation_columns {
            config = config.with_documentation_columns(columns.iter().map(String::as_str));
        }
        if let Some(field) = &decl.documentation_sort {
            config = config.with_sort_key(SortKey::by_field(field.as_str()));
        }

        let mut builder = Container::define(decl.path.as_str()).config(config);
        for parent in &decl.extends {
            let parent = registry.containers.get(parent).ok_or_else(|| {
                Error::new(ErrorKind::ManifestError(format!("unknown container: {parent}")))
            })?;
            builder = builder.extends(parent);
        }

        let default_type = decl.token_type.as_deref().unwrap_or(BASE_TYPE_PATH);
        for token in &decl.tokens {
            let ty = registry.resolve_type(token.token_type.as_deref().unwrap_or(default_type))?;
            let mut tb = ty.token();
            for (field, value) in &token.fields {
                tb = tb.set(field.as_str(), to_value(value.clone()));
            }
            for field in &token.request {
                tb = tb.request(field.as_str());
            }
            if token.overriding {
                tb = tb.overriding();
            }
            let built = tb.build().map_err(|e| e.in_frame(format!("token {}", token.name)))?;
            builder = builder.token(token.name.as_str(), built);
        }

        builder.build()
    }
}

/// Token types and containers bound from a manifest.
#[derive(Debug, Default)]
pub struct Registry {
    types: NameMap<Arc<TokenType>>,
    containers: NameMap<Arc<Container>>,
}

impl Registry {
    /// Finds a container by path or, if unambiguous, by short name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if no container, or more than one by short
    /// name, matches.
    pub fn container(&self, name: &str) -> Result<&Arc<Container>> {
        if let Some(container) = self.containers.get(name) {
            return Ok(container);
        }
        let mut matches = self.containers.values().filter(|c| c.short_name() == name);
        match (matches.next(), matches.next()) {
            (Some(container), None) => Ok(container),
            (Some(_), Some(_)) => Err(Error::invalid_input(format!("ambiguous container name: {name}"))),
            (None, _) => Err(Error::invalid_input(format!("unknown container: {name}"))),
        }
    }

    /// Returns the containers in declaration order.
    pub fn containers(&self) -> impl Iterator<Item = &Arc<Container>> {
        self.containers.values()
    }

    /// Returns a token type by path.
    #[must_use]
    pub fn token_type(&self, path: &str) -> Option<&Arc<TokenType>> {
        self.types.get(path)
    }

    /// Returns the token types in declaration order.
    pub fn token_types(&self) -> impl Iterator<Item = &Arc<TokenType>> {
        self.types.values()
    }

    /// Rebuilds a token from a snapshot, resolving its type by path.
    ///
    /// # Errors
    ///
    /// Returns `ManifestError` for an unknown type and any restore error.
    pub fn restore(&self, snapshot: TokenSnapshot) -> Result<Token> {
        let ty = Arc::clone(self.resolve_type(&snapshot.token_type)?);
        Token::from_snapshot(snapshot, &ty)
    }

    fn resolve_type(&self, path: &str) -> Result<&Arc<TokenType>> {
        if path == BASE_TYPE_PATH {
            return Ok(base_type());
        }
        self.types
            .get(path)
            .ok_or_else(|| Error::new(ErrorKind::ManifestError(format!("unknown token type: {path}"))))
    }
}

fn base_type() -> &'static Arc<TokenType> {
    static BASE: std::sync::LazyLock<Arc<TokenType>> = std::sync::LazyLock::new(TokenType::base);
    &BASE
}

/// Converts a TOML value into a field value.
///
/// Arrays become tuples so that they stay hashable; tables become maps,
/// which tokens reject.
#[must_use]
pub fn to_value(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::from(s),
        toml::Value::Integer(i) => Value::Int(i),
        toml::Value::Float(f) => Value::Float(f),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(d) => Value::from(d.to_string()),
        toml::Value::Array(items) => Value::Tuple(items.into_iter().map(to_value).collect()),
        toml::Value::Table(table) => Value::Map(
            table
                .into_iter()
                .map(|(k, v)| (Value::from(k), to_value(v)))
                .collect(),
        ),
    }
}
