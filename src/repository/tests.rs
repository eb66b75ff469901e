//! Repository Scenario Tests
//!
//! Multi-step sequences over the collection document.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use crate::domain::{Collection, DomainError, FoodItem, FoodList, IdGenerator, ListId};
    use crate::repository::{add_item, apply_suggestions, create_list, delete_list, repair_active};

    fn pho_collection() -> Collection {
        let mut list = FoodList::new("a", "A");
        list.items.push(FoodItem::new("1", "Phở"));
        Collection::new(vec![list])
    }

    #[test]
    fn test_whitespace_item_leaves_collection_unchanged() {
        let mut ids = IdGenerator::seeded(11);
        let base = pho_collection();
        let snapshot = base.clone();

        let err = add_item(&base, &mut ids, &ListId::new("a"), "  ", None).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(base, snapshot);
    }

    #[test]
    fn test_suggestion_block_goes_in_front_in_order() {
        let mut ids = IdGenerator::seeded(12);
        let suggestions = vec!["Bánh Xèo".to_string(), "Hủ Tiếu".to_string()];

        let (next, added) = apply_suggestions(&pho_collection(), &mut ids, &ListId::new("a"), &suggestions).unwrap();

        assert_eq!(added, 2);
        let names: Vec<&str> = next.lists()[0].items.iter().map(|item| item.name.as_str()).collect();
        assert_eq!(names, vec!["Bánh Xèo", "Hủ Tiếu", "Phở"]);
    }

    #[test]
    fn test_deleting_only_list_clears_active() {
        let base = pho_collection();
        let active = Some(ListId::new("a"));

        let next = delete_list(&base, &ListId::new("a")).unwrap();

        assert!(next.is_empty());
        assert_eq!(repair_active(&next, active.as_ref()), None);
    }

    #[test]
    fn test_deleting_active_list_moves_to_new_first() {
        let base = Collection::defaults();
        let active = Some(ListId::new("normal"));

        let next = delete_list(&base, &ListId::new("normal")).unwrap();

        assert_eq!(repair_active(&next, active.as_ref()), Some(ListId::new("healthy")));
    }

    #[test]
    fn test_suggested_ids_unique_within_list() {
        let mut ids = IdGenerator::seeded(13);
        let names: Vec<String> = (0..50).map(|i| format!("Món {}", i)).collect();

        let (next, _) = apply_suggestions(&pho_collection(), &mut ids, &ListId::new("a"), &names).unwrap();

        let unique: HashSet<&str> = next.lists()[0].items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(unique.len(), 51);
    }

    proptest! {
        #[test]
        fn prop_list_ids_never_recollide(ops in proptest::collection::vec(any::<bool>(), 1..60)) {
            let mut ids = IdGenerator::seeded(99);
            let mut collection = Collection::defaults();
            let mut seen: HashSet<ListId> = collection.lists().iter().map(|list| list.id.clone()).collect();

            for create in ops {
                if create || collection.is_empty() {
                    let (next, id) = create_list(&collection, &mut ids, "Danh sách").unwrap();
                    prop_assert!(seen.insert(id));
                    collection = next;
                } else {
                    let victim = collection.first_id().cloned().unwrap();
                    collection = delete_list(&collection, &victim).unwrap();
                }
            }
        }

        #[test]
        fn prop_two_generators_never_share_a_live_id(
            seeds in (any::<u64>(), any::<u64>()),
            same_seed in any::<bool>(),
            ops in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..60),
        ) {
            // Two sessions minting into one document, possibly with the same salts
            let (first_seed, second_seed) = seeds;
            let second_seed = if same_seed { first_seed } else { second_seed };
            let mut generators = [IdGenerator::seeded(first_seed), IdGenerator::seeded(second_seed)];
            let mut collection = Collection::defaults();

            for (create, use_second) in ops {
                if create || collection.is_empty() {
                    let ids = &mut generators[usize::from(use_second)];
                    let (next, id) = create_list(&collection, ids, "Danh sách").unwrap();
                    prop_assert!(!collection.contains(&id));
                    collection = next;
                } else {
                    let victim = collection.first_id().cloned().unwrap();
                    collection = delete_list(&collection, &victim).unwrap();
                }

                let live: HashSet<&ListId> = collection.lists().iter().map(|list| &list.id).collect();
                prop_assert_eq!(live.len(), collection.len());
            }
        }

        #[test]
        fn prop_create_list_grows_by_one(name in "[a-zA-Z][a-zA-Z ]{0,20}") {
            let mut ids = IdGenerator::seeded(5);
            let base = Collection::defaults();
            let (next, id) = create_list(&base, &mut ids, &name).unwrap();
            prop_assert_eq!(next.len(), base.len() + 1);
            prop_assert!(next.find(&id).unwrap().items.is_empty());
        }
    }
}
