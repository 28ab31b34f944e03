//! Boolean substring search over stored metadata.
//!
//! Searches are linear scans: every record is visited in store order and
//! its field value tested with a case-sensitive `contains`. The empty
//! substring therefore matches every record whose field is set; only the
//! unset sentinel filters a record out. Results are identifier lists that
//! feed the AND/OR combinators; neither combinator mutates its inputs.

use fnv::FnvHashSet;

use crate::store::{MetadataField, MetadataStore};
use crate::types::ImageId;

/// Borrowing search view over one [`MetadataStore`].
#[derive(Debug, Clone, Copy)]
pub struct SearchEngine<'a> {
    store: &'a MetadataStore,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a MetadataStore) -> Self {
        Self { store }
    }

    /// Identifiers whose `field` value contains `sub`, in store order.
    pub fn field_contains(&self, field: MetadataField, sub: &str) -> Vec<ImageId> {
        self.store
            .iter()
            .filter(|(_, record)| {
                record
                    .field(field)
                    .is_some_and(|value| value.contains(sub))
            })
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn prompt(&self, sub: &str) -> Vec<ImageId> {
        self.field_contains(MetadataField::Prompt, sub)
    }

    pub fn model(&self, sub: &str) -> Vec<ImageId> {
        self.field_contains(MetadataField::Model, sub)
    }

    pub fn seed(&self, sub: &str) -> Vec<ImageId> {
        self.field_contains(MetadataField::Seed, sub)
    }

    pub fn cfg_scale(&self, sub: &str) -> Vec<ImageId> {
        self.field_contains(MetadataField::CfgScale, sub)
    }

    pub fn steps(&self, sub: &str) -> Vec<ImageId> {
        self.field_contains(MetadataField::Steps, sub)
    }

    pub fn sampler(&self, sub: &str) -> Vec<ImageId> {
        self.field_contains(MetadataField::Sampler, sub)
    }

    /// Searches the Created_Date field.
    pub fn date(&self, sub: &str) -> Vec<ImageId> {
        self.field_contains(MetadataField::CreatedDate, sub)
    }
}

/// Identifiers present in both lists.
///
/// Keeps `a`'s relative order and drops duplicates from `a`.
pub fn and_operator(a: &[ImageId], b: &[ImageId]) -> Vec<ImageId> {
    let in_b: FnvHashSet<&ImageId> = b.iter().collect();
    let mut seen = FnvHashSet::default();
    a.iter()
        .filter(|id| in_b.contains(id) && seen.insert(**id))
        .copied()
        .collect()
}

/// Order-preserving deduplicated union: `a`'s elements first, then the new
/// ones from `b`.
pub fn or_operator(a: &[ImageId], b: &[ImageId]) -> Vec<ImageId> {
    let mut seen = FnvHashSet::default();
    a.iter()
        .chain(b.iter())
        .filter(|id| seen.insert(**id))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::canonical_path;
    use crate::store::png::test_support::*;
    use crate::store::MetadataStore;
    use std::path::Path;
    use tempfile::TempDir;

    /// Builds a store from `(file name, [(keyword, value)])` fixtures and
    /// returns it with the identifiers in declaration order.
    fn store_with(
        temp: &TempDir,
        images: &[(&str, &[(&str, &str)])],
    ) -> (MetadataStore, Vec<ImageId>) {
        let mut store = MetadataStore::new();
        let mut ids = Vec::new();
        for (name, pairs) in images {
            let mut chunks = vec![chunk(b"IHDR", &ihdr(1, 1))];
            for (keyword, value) in *pairs {
                chunks.push(chunk(b"tEXt", &text_payload(keyword, value)));
            }
            chunks.push(chunk(b"IEND", &[]));
            write_png(temp.path(), name, &chunks);

            let path = canonical_path(Path::new(name), temp.path()).unwrap();
            let id = ImageId::from_path(&path);
            store.add_image(id, path).unwrap();
            store.load_metadata(temp.path(), &id);
            ids.push(id);
        }
        (store, ids)
    }

    #[test]
    fn substring_search_is_case_sensitive() {
        let temp = TempDir::new().unwrap();
        let (store, ids) = store_with(
            &temp,
            &[
                ("one.png", &[("Prompt", "cat in space")]),
                ("two.png", &[("Prompt", "dog on moon")]),
            ],
        );
        let search = SearchEngine::new(&store);

        assert_eq!(search.prompt("cat"), vec![ids[0]]);
        assert_eq!(search.prompt("o"), vec![ids[1]]);
        assert_eq!(search.prompt("Cat"), Vec::<ImageId>::new());
    }

    #[test]
    fn empty_substring_matches_every_set_field() {
        let temp = TempDir::new().unwrap();
        let (store, ids) = store_with(
            &temp,
            &[
                ("one.png", &[("Prompt", "cat")]),
                ("two.png", &[("Model", "SD2")]),
            ],
        );
        let search = SearchEngine::new(&store);

        // one.png has a prompt, two.png does not.
        assert_eq!(search.prompt(""), vec![ids[0]]);
        assert_eq!(search.model(""), vec![ids[1]]);
        assert!(search.sampler("").is_empty());
    }

    #[test]
    fn every_field_accessor_searches_its_own_field() {
        let temp = TempDir::new().unwrap();
        let (store, ids) = store_with(
            &temp,
            &[(
                "full.png",
                &[
                    ("Prompt", "p"),
                    ("Model", "m"),
                    ("Seed", "1234"),
                    ("CFG_Scale", "7.5"),
                    ("Steps", "30"),
                    ("Sampler", "Euler a"),
                    ("Created_Date", "2025-09-30"),
                ],
            )],
        );
        let search = SearchEngine::new(&store);

        assert_eq!(search.prompt("p"), ids);
        assert_eq!(search.model("m"), ids);
        assert_eq!(search.seed("23"), ids);
        assert_eq!(search.cfg_scale("7."), ids);
        assert_eq!(search.steps("30"), ids);
        assert_eq!(search.sampler("Euler"), ids);
        assert_eq!(search.date("2025-"), ids);
        assert!(search.date("2024").is_empty());
    }

    #[test]
    fn results_follow_store_order() {
        let temp = TempDir::new().unwrap();
        let (store, mut ids) = store_with(
            &temp,
            &[
                ("z.png", &[("Prompt", "shared")]),
                ("a.png", &[("Prompt", "shared")]),
                ("m.png", &[("Prompt", "shared")]),
            ],
        );
        let search = SearchEngine::new(&store);

        ids.sort();
        assert_eq!(search.prompt("shared"), ids);
    }

    #[test]
    fn and_operator_intersects_preserving_left_order() {
        let temp = TempDir::new().unwrap();
        let (_, ids) = store_with(
            &temp,
            &[("a.png", &[]), ("b.png", &[]), ("c.png", &[])],
        );

        let left = vec![ids[2], ids[0], ids[2], ids[1]];
        let right = vec![ids[1], ids[2]];
        assert_eq!(and_operator(&left, &right), vec![ids[2], ids[1]]);

        // Inputs are untouched.
        assert_eq!(left.len(), 4);
        assert_eq!(right.len(), 2);
    }

    #[test]
    fn or_operator_unions_preserving_order() {
        let temp = TempDir::new().unwrap();
        let (_, ids) = store_with(
            &temp,
            &[("a.png", &[]), ("b.png", &[]), ("c.png", &[])],
        );

        let left = vec![ids[1], ids[0]];
        let right = vec![ids[0], ids[2]];
        assert_eq!(or_operator(&left, &right), vec![ids[1], ids[0], ids[2]]);
    }

    #[test]
    fn combinators_handle_empty_inputs() {
        let temp = TempDir::new().unwrap();
        let (_, ids) = store_with(&temp, &[("a.png", &[])]);

        assert!(and_operator(&[], &ids).is_empty());
        assert!(and_operator(&ids, &[]).is_empty());
        assert_eq!(or_operator(&[], &ids), ids);
        assert_eq!(or_operator(&ids, &[]), ids);
    }
}
