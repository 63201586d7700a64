use ahash::AHashMap;
use rand::Rng;
use rand::distr::Alphanumeric;

/// Source of ids for nodes created by `add` and `replace`.
///
/// Ids only need to be unique in practice; the diff engine re-draws on a collision
/// with an id already present in the specification.
pub trait IdGenerator {
    fn generate(&mut self, component_type: &str) -> String;
}

impl<F> IdGenerator for F
where
    F: FnMut(&str) -> String,
{
    fn generate(&mut self, component_type: &str) -> String {
        self(component_type)
    }
}

const RANDOM_SUFFIX_LEN: usize = 9;

/// Produces `<type>-<9 lowercase alphanumerics>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn generate(&mut self, component_type: &str) -> String {
        let suffix: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(RANDOM_SUFFIX_LEN)
            .map(|b| char::from(b).to_ascii_lowercase())
            .collect();
        format!("{}-{}", component_type, suffix)
    }
}

/// Deterministic `<type>-<n>` ids, counting separately per type from 1.
#[derive(Debug, Default, Clone)]
pub struct SequentialIdGenerator {
    counters: AHashMap<String, u64>,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&mut self, component_type: &str) -> String {
        let counter = self.counters.entry(component_type.to_string()).or_insert(0);
        *counter += 1;
        format!("{}-{}", component_type, counter)
    }
}
