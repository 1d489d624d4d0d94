//! Schema merging for multi-input stages.
//!
//! Folds each input stream's schema into the stage's accumulated output
//! schema. Runs once per input at setup, never per row. Fields are only
//! appended; what happens to a name that is already taken is decided by the
//! [`DuplicatePolicy`] the merger was built with.

use rowfuse_core::config::DuplicatePolicy;
use rowfuse_core::schema::{Field, Schema, SharedSchema};

/// What one merge call did to the accumulated schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Fields appended under their own name.
    pub appended: usize,
    /// Fields appended under a disambiguated name.
    pub renamed: usize,
    /// Fields skipped because the name was taken.
    pub dropped: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaMerger {
    policy: DuplicatePolicy,
}

impl SchemaMerger {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Append the fields of `incoming` to `acc`, in order.
    ///
    /// `origin` names the stage `incoming` comes from. It is recorded on every
    /// appended field that does not already carry an origin.
    pub fn merge_into(&self, acc: &mut Schema, incoming: &Schema, origin: &str) -> MergeReport {
        let mut report = MergeReport::default();

        for field in incoming.fields() {
            if !acc.contains(&field.name) {
                acc.push(stamp(field.clone(), origin));
                report.appended += 1;
                continue;
            }
            match self.policy {
                DuplicatePolicy::Prevent => report.dropped += 1,
                DuplicatePolicy::Rename => {
                    let mut renamed = field.clone();
                    renamed.name = disambiguate(acc, &field.name);
                    renamed.origin = Some(origin.to_string());
                    acc.push(renamed);
                    report.renamed += 1;
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            origin,
            policy = ?self.policy,
            appended = report.appended,
            renamed = report.renamed,
            dropped = report.dropped,
            fields = acc.len(),
            "merged input schema"
        );

        report
    }

    /// [`SchemaMerger::merge_into`] on a shared schema, holding its write lock
    /// for the whole merge so readers never see a half-merged input.
    pub fn merge_into_shared(
        &self,
        acc: &SharedSchema,
        incoming: &Schema,
        origin: &str,
    ) -> MergeReport {
        acc.write(|schema| self.merge_into(schema, incoming, origin))
    }
}

fn stamp(mut field: Field, origin: &str) -> Field {
    if field.origin.is_none() {
        field.origin = Some(origin.to_string());
    }
    field
}

/// `name[n]` for the smallest `n >= 2` not already in `schema`.
fn disambiguate(schema: &Schema, name: &str) -> String {
    let mut n = 2usize;
    loop {
        let candidate = format!("{name}[{n}]");
        if !schema.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
