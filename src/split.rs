// Stratified train/test assignment.
//
// Two predicate phases over the non-source records: plagiarized answers
// (category code > 0) and clean answers (code == 0). Both phases run the
// same seeded sampler so a fixed seed reproduces the exact train/test
// CSVs across runs.
//
// Each (task, category) group draws its test picks without replacement
// from a fresh RNG seeded with the configured seed. The draw for one
// group therefore does not depend on how many groups were walked before
// it, only on the seed and the group's own membership order.

use std::collections::{BTreeMap, HashMap};

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tracing::debug;

use crate::corpus::record::{Category, Partition, Record};
use crate::corpus::Corpus;

/// Sampling parameters shared by both splitter phases.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// RNG seed used by every per-group draw.
    pub seed: u64,
    /// Test records drawn per (task, category) group of plagiarized answers.
    pub plagiarized_test_per_group: usize,
    /// Test records drawn per (task, category) group of clean answers.
    pub clean_test_per_group: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            plagiarized_test_per_group: 1,
            clean_test_per_group: 2,
        }
    }
}

/// Partition assignment keyed by file id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitAssignment {
    by_file: HashMap<String, Partition>,
}

impl SplitAssignment {
    /// The partition assigned to a file, if the file was in the corpus.
    pub fn partition(&self, file: &str) -> Option<Partition> {
        self.by_file.get(file).copied()
    }

    /// How many files landed in the given partition.
    pub fn count(&self, partition: Partition) -> usize {
        self.by_file.values().filter(|&&p| p == partition).count()
    }

    pub fn len(&self) -> usize {
        self.by_file.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_file.is_empty()
    }
}

/// Assign every record to a partition.
///
/// Source records are tagged `Orig` and never sampled; every other record
/// ends up `Train` or `Test`. Returns a fresh assignment map; the corpus
/// itself is never mutated.
pub fn assign_partitions(corpus: &Corpus, config: &SplitConfig) -> SplitAssignment {
    let mut by_file = HashMap::with_capacity(corpus.len());

    for record in corpus.records() {
        if record.is_source() {
            by_file.insert(record.file.clone(), Partition::Orig);
        }
    }

    tag_phase(
        corpus.records(),
        |category| category.code() > 0,
        config.plagiarized_test_per_group,
        config.seed,
        &mut by_file,
    );
    tag_phase(
        corpus.records(),
        |category| category.code() == 0,
        config.clean_test_per_group,
        config.seed,
        &mut by_file,
    );

    SplitAssignment { by_file }
}

/// One sampling phase: default the predicate's subset to `Train`, then
/// draw up to `test_per_group` members of each (task, category) group
/// into `Test`.
fn tag_phase(
    records: &[Record],
    predicate: impl Fn(&Category) -> bool,
    test_per_group: usize,
    seed: u64,
    by_file: &mut HashMap<String, Partition>,
) {
    // Group the subset by (task, category code), preserving input order
    // within each group. BTreeMap keeps the group walk deterministic.
    let mut groups: BTreeMap<(String, i8), Vec<&Record>> = BTreeMap::new();
    for record in records {
        if record.is_source() || !predicate(&record.category) {
            continue;
        }
        by_file.insert(record.file.clone(), Partition::Train);
        groups
            .entry((record.task.clone(), record.category.code()))
            .or_default()
            .push(record);
    }

    for ((task, code), members) in &groups {
        let take = members.len().min(test_per_group);
        let mut rng = StdRng::seed_from_u64(seed);
        for picked in members.choose_multiple(&mut rng, take) {
            by_file.insert(picked.file.clone(), Partition::Test);
        }
        debug!(
            task = %task,
            category = *code,
            group_size = members.len(),
            test = take,
            "sampled group"
        );
    }
}
