use std::collections::BTreeMap;
use std::time::Instant;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, trace};

use autofixture_core::{Category, FieldPath, FixtureValue};
use autofixture_spec::{Override, Overrides, check_compatible};

use crate::errors::GenerationError;
use crate::model::{DEFAULT_COUNT, FixtureOptions};
use crate::resolve::{SpecGenerator, resolve_generator_within};

/// Override attached to the node being populated.
#[derive(Debug, Clone, Copy)]
enum Entry<'a> {
    Spec(&'a str),
    Tree(&'a Overrides),
}

impl<'a> From<&'a Override> for Entry<'a> {
    fn from(value: &'a Override) -> Self {
        match value {
            Override::Spec(spec) => Entry::Spec(spec),
            Override::Tree(tree) => Entry::Tree(tree),
        }
    }
}

/// Populates templates with random values.
///
/// The random source is injected; templates are read, never modified.
#[derive(Debug, Clone)]
pub struct Autofixture<R = ChaCha8Rng> {
    rng: R,
    options: FixtureOptions,
}

impl Autofixture<ChaCha8Rng> {
    /// Builds an engine seeded from `options.seed`, or from a fresh seed.
    pub fn new(options: FixtureOptions) -> Self {
        let seed = options.seed.unwrap_or_else(rand::random);
        debug!(seed, "autofixture seeded");
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            options,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(FixtureOptions::default().with_seed(seed))
    }
}

impl Default for Autofixture<ChaCha8Rng> {
    fn default() -> Self {
        Self::new(FixtureOptions::default())
    }
}

impl<R: RngCore> Autofixture<R> {
    pub fn with_rng(rng: R, options: FixtureOptions) -> Self {
        Self { rng, options }
    }

    pub fn options(&self) -> &FixtureOptions {
        &self.options
    }

    /// The random source, for ad-hoc calls into `primitives`.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Builds one fixture shaped like `template`.
    pub fn create(
        &mut self,
        template: &FixtureValue,
        overrides: Option<&Overrides>,
    ) -> Result<FixtureValue, GenerationError> {
        let path = FieldPath::root();
        let category = Category::of(template, path.as_str())?;
        self.populate(template, category, overrides.map(Entry::Tree), &path)
    }

    /// Builds `count` independent fixtures shaped like `template`.
    pub fn create_many(
        &mut self,
        template: &FixtureValue,
        count: usize,
        overrides: Option<&Overrides>,
    ) -> Result<Vec<FixtureValue>, GenerationError> {
        let start = Instant::now();
        let fixtures = (0..count)
            .map(|_| self.create(template, overrides))
            .collect::<Result<Vec<_>, _>>()?;
        info!(
            count,
            duration_ms = start.elapsed().as_millis() as u64,
            "fixtures generated"
        );
        Ok(fixtures)
    }

    /// `create_many` with the default count of three.
    pub fn create_default_many(
        &mut self,
        template: &FixtureValue,
        overrides: Option<&Overrides>,
    ) -> Result<Vec<FixtureValue>, GenerationError> {
        self.create_many(template, DEFAULT_COUNT, overrides)
    }

    /// Builds one fixture from a JSON template.
    pub fn create_json(
        &mut self,
        template: &serde_json::Value,
        overrides: Option<&Overrides>,
    ) -> Result<serde_json::Value, GenerationError> {
        let template = FixtureValue::from(template.clone());
        Ok(self.create(&template, overrides)?.to_json()?)
    }

    /// Builds a typed fixture using `template` as the shape.
    pub fn create_as<T>(
        &mut self,
        template: &T,
        overrides: Option<&Overrides>,
    ) -> Result<T, GenerationError>
    where
        T: Serialize + DeserializeOwned,
    {
        let template = FixtureValue::from_serializable(template)?;
        Ok(self.create(&template, overrides)?.deserialize_into()?)
    }

    fn populate(
        &mut self,
        value: &FixtureValue,
        category: Category,
        entry: Option<Entry<'_>>,
        path: &FieldPath,
    ) -> Result<FixtureValue, GenerationError> {
        trace!(field = %path, %category, "populating field");
        match (category, value) {
            (Category::Object, FixtureValue::Object(fields)) => {
                let tree = nested_tree(entry, path)?;
                Ok(FixtureValue::Object(self.populate_object(fields, tree, path)?))
            }
            (Category::ArrayOfObjects, FixtureValue::Array(values)) => {
                let tree = nested_tree(entry, path)?;
                let Some(FixtureValue::Object(element)) = values.first() else {
                    return Ok(FixtureValue::Array(Vec::new()));
                };
                let element_path = path.element();
                let elements = (0..self.options.element_count)
                    .map(|_| {
                        self.populate_object(element, tree, &element_path)
                            .map(FixtureValue::Object)
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(FixtureValue::Array(elements))
            }
            (Category::ArrayOfPrimitives, FixtureValue::Array(values)) => {
                self.populate_primitives(values, entry, path)
            }
            (Category::EmptyArray, _) => {
                if entry.is_some() {
                    debug!(field = %path, "override ignored for empty array");
                }
                Ok(FixtureValue::Array(Vec::new()))
            }
            (category, value) => {
                let generator = self.scalar_generator(value, category, entry, path)?;
                generator.generate(&mut self.rng)
            }
        }
    }

    fn populate_object(
        &mut self,
        fields: &BTreeMap<String, FixtureValue>,
        tree: Option<&Overrides>,
        path: &FieldPath,
    ) -> Result<BTreeMap<String, FixtureValue>, GenerationError> {
        if let Some(tree) = tree {
            if self.options.strict_overrides {
                if let Some(unknown) = tree.names().find(|name| !fields.contains_key(*name)) {
                    return Err(GenerationError::UnknownOverrideField {
                        field: path.child(unknown).to_string(),
                    });
                }
            }
        }

        let mut result = BTreeMap::new();
        for (name, value) in fields {
            let field_path = path.child(name);
            let category = Category::of(value, field_path.as_str())?;
            let entry = tree.and_then(|tree| tree.get(name));
            if entry.is_some_and(Override::is_skip) {
                debug!(field = %field_path, "field skipped");
                continue;
            }
            let generated = self.populate(value, category, entry.map(Entry::from), &field_path)?;
            result.insert(name.clone(), generated);
        }
        Ok(result)
    }

    fn populate_primitives(
        &mut self,
        values: &[FixtureValue],
        entry: Option<Entry<'_>>,
        path: &FieldPath,
    ) -> Result<FixtureValue, GenerationError> {
        let Some(first) = values.first() else {
            return Ok(FixtureValue::Array(Vec::new()));
        };
        let element_path = path.element();
        let category = Category::of(first, element_path.as_str())?;
        let generator = self.scalar_generator(first, category, entry, path)?;
        let elements = (0..self.options.element_count)
            .map(|_| generator.generate(&mut self.rng))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FixtureValue::Array(elements))
    }

    /// Generator for a scalar: the override spec when present, otherwise the
    /// value's own kind.
    fn scalar_generator(
        &self,
        value: &FixtureValue,
        category: Category,
        entry: Option<Entry<'_>>,
        path: &FieldPath,
    ) -> Result<SpecGenerator, GenerationError> {
        match entry {
            Some(Entry::Spec(spec)) => {
                let generator = resolve_generator_within(spec, self.options.window)
                    .map_err(|err| GenerationError::spec(path, err))?;
                check_compatible(spec, generator.rule(), category)
                    .map_err(|err| GenerationError::spec(path, err))?;
                Ok(generator)
            }
            Some(Entry::Tree(_)) => Err(GenerationError::MisshapedOverride {
                field: path.to_string(),
                expected: "a spec string",
            }),
            None => SpecGenerator::implicit_for(value, self.options.window).ok_or_else(|| {
                GenerationError::UnsupportedFieldType {
                    field: path.to_string(),
                    category,
                }
            }),
        }
    }
}

fn nested_tree<'a>(
    entry: Option<Entry<'a>>,
    path: &FieldPath,
) -> Result<Option<&'a Overrides>, GenerationError> {
    match entry {
        None => Ok(None),
        Some(Entry::Tree(tree)) => Ok(Some(tree)),
        Some(Entry::Spec(_)) => Err(GenerationError::MisshapedOverride {
            field: path.to_string(),
            expected: "a nested override tree",
        }),
    }
}
