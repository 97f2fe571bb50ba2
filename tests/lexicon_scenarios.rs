use std::collections::HashSet;

use lexigraph::error::{LexiconError, Result};
use lexigraph::lexicon::Lexicon;
use lexigraph::synset::{Pos, Synset};

fn synset(id: &str, pos: Pos, words: &[&str]) -> Result<Synset> {
    Synset::new(id)?.with_pos(pos).with_literals(words.iter().copied())
}

/// a -> b -> c and d -> b through "hypernym", plus a few side relations.
fn hierarchy() -> Result<Lexicon> {
    let mut lexicon = Lexicon::new();
    lexicon.add_relation_type("hypernym")?;
    lexicon.add_relation_type("near_antonym")?;
    lexicon.add_relation_type("part_meronym")?;

    lexicon.add_synset(synset("a", Pos::Noun, &["stejar"])?)?;
    lexicon.add_synset(synset("b", Pos::Noun, &["arbore", "copac"])?)?;
    lexicon.add_synset(synset("c", Pos::Noun, &["plantă"])?)?;
    lexicon.add_synset(synset("d", Pos::Noun, &["brad", "arbore"])?)?;
    lexicon.add_synset(synset("e", Pos::Noun, &["frunză"])?)?;

    lexicon.add_relation("a", "b", "hypernym")?;
    lexicon.add_relation("b", "c", "hypernym")?;
    lexicon.add_relation("d", "b", "hypernym")?;
    lexicon.add_relation("e", "a", "part_meronym")?;
    lexicon.add_relation("a", "d", "near_antonym")?;
    Ok(lexicon)
}

#[test]
fn test_literal_round_trip_through_add_and_remove() -> Result<()> {
    let mut lexicon = hierarchy()?;

    lexicon.add_literal("c", "vegetal", "2")?;
    assert!(lexicon.synsets(Some("vegetal"), None).contains(&"c"));

    lexicon.remove_literal("c", "vegetal")?;
    lexicon.reindex_literals();
    assert!(!lexicon.synsets(Some("vegetal"), None).contains(&"c"));
    Ok(())
}

#[test]
fn test_literal_lookup_order_follows_registration() -> Result<()> {
    let lexicon = hierarchy()?;
    assert_eq!(lexicon.synsets(Some("arbore"), None), vec!["b", "d"]);
    assert_eq!(lexicon.synsets(Some("arbore"), Some(Pos::Verb)), Vec::<&str>::new());
    Ok(())
}

#[test]
fn test_generated_ids_strictly_increase() -> Result<()> {
    let mut lexicon = hierarchy()?;
    let first = lexicon.generate_id("RO-", "-x")?;
    lexicon.add_synset(Synset::new(first.clone())?)?;
    let second = lexicon.generate_id("RO-", "-x")?;

    assert_eq!(first, "RO-00000001-x");
    assert_eq!(second, "RO-00000002-x");
    Ok(())
}

#[test]
fn test_relation_symmetry_and_removal() -> Result<()> {
    let mut lexicon = hierarchy()?;

    assert!(lexicon.outbound_relations("a")?.contains(&("b", "hypernym")));
    assert!(lexicon.inbound_relations("b")?.contains(&("a", "hypernym")));

    lexicon.remove_relation("a", "b")?;
    assert!(!lexicon.outbound_relations("a")?.contains(&("b", "hypernym")));
    assert!(!lexicon.inbound_relations("b")?.contains(&("a", "hypernym")));
    Ok(())
}

#[test]
fn test_second_relation_between_same_pair_is_rejected() -> Result<()> {
    let mut lexicon = hierarchy()?;
    for label in ["hypernym", "near_antonym", "part_meronym"] {
        let err = lexicon.add_relation("a", "b", label).unwrap_err();
        assert!(matches!(err, LexiconError::RelationAlreadyExists { .. }));
    }
    Ok(())
}

#[test]
fn test_breadth_first_walk_visits_reachable_set_once() -> Result<()> {
    let mut lexicon = hierarchy()?;
    // Close a cycle to make sure nothing repeats
    lexicon.add_relation("c", "e", "part_meronym")?;

    let visited: Vec<&str> = lexicon
        .breadth_first_walk("e")?
        .map(|step| step.synset_id)
        .collect();
    let unique: HashSet<&str> = visited.iter().copied().collect();

    assert_eq!(visited.len(), unique.len());
    assert_eq!(unique, HashSet::from(["a", "b", "c", "d"]));
    assert_eq!(visited[0], "a");
    Ok(())
}

#[test]
fn test_breadth_first_walk_reports_discovering_edge() -> Result<()> {
    let lexicon = hierarchy()?;
    let steps: Vec<(&str, &str, &str)> = lexicon
        .breadth_first_walk("a")?
        .map(|step| (step.synset_id, step.relation, step.predecessor))
        .collect();

    assert_eq!(
        steps,
        vec![
            ("b", "hypernym", "a"),
            ("d", "near_antonym", "a"),
            ("c", "hypernym", "b"),
        ]
    );
    Ok(())
}

#[test]
fn test_breadth_first_walk_can_stop_early() -> Result<()> {
    let lexicon = hierarchy()?;
    let first: Vec<&str> = lexicon
        .breadth_first_walk("e")?
        .take(1)
        .map(|step| step.synset_id)
        .collect();
    assert_eq!(first, vec!["a"]);
    Ok(())
}

#[test]
fn test_lowest_common_ancestor_of_siblings() -> Result<()> {
    let lexicon = hierarchy()?;
    assert_eq!(lexicon.lowest_common_ancestor("a", "d", None)?, Some("b"));
    assert_eq!(lexicon.lowest_common_ancestor("a", "c", None)?, Some("c"));
    assert_eq!(lexicon.lowest_common_ancestor("a", "e", None)?, None);
    Ok(())
}

#[test]
fn test_root_path_validation() -> Result<()> {
    let lexicon = hierarchy()?;
    assert_eq!(lexicon.root_path("a", None)?, vec!["a", "b", "c"]);
    assert_eq!(lexicon.root_path("e", Some("part_meronym"))?, vec!["e", "a"]);
    assert!(matches!(
        lexicon.root_path("zz", None),
        Err(LexiconError::NotInLexicon { .. })
    ));
    assert!(matches!(
        lexicon.root_path("a", Some("holonym")),
        Err(LexiconError::InvalidRelationType { .. })
    ));
    Ok(())
}

#[test]
fn test_shortest_path_modes() -> Result<()> {
    let lexicon = hierarchy()?;

    assert_eq!(lexicon.shortest_path("e", "c", None)?, vec!["e", "a", "b", "c"]);
    assert_eq!(lexicon.shortest_path("a", "a", None)?, vec!["a"]);
    assert_eq!(
        lexicon.shortest_path("a", "d", Some(&["hypernym", "near_antonym"][..]))?,
        vec!["a", "d"]
    );

    assert!(matches!(
        lexicon.shortest_path("c", "a", None),
        Err(LexiconError::PathNotFound { .. })
    ));
    assert!(matches!(
        lexicon.shortest_path("a", "d", Some(&["hypernym"][..])),
        Err(LexiconError::PathNotFound { .. })
    ));
    assert!(matches!(
        lexicon.shortest_path("a", "d", Some(&["holonym"][..])),
        Err(LexiconError::InvalidRelationType { .. })
    ));
    Ok(())
}

#[test]
fn test_label_filter_forces_longer_path() -> Result<()> {
    let mut lexicon = Lexicon::new();
    lexicon.add_relation_type("x")?;
    lexicon.add_relation_type("y")?;
    for id in ["a", "b", "c"] {
        lexicon.add_synset(synset(id, Pos::Noun, &[id])?)?;
    }
    lexicon.add_relation("a", "b", "x")?;
    lexicon.add_relation("b", "c", "x")?;
    lexicon.add_relation("a", "c", "y")?;

    assert_eq!(lexicon.shortest_path("a", "c", None)?, vec!["a", "c"]);
    assert_eq!(
        lexicon.shortest_path("a", "c", Some(&["x"][..]))?,
        vec!["a", "b", "c"]
    );
    Ok(())
}

#[test]
fn test_empty_ids_are_rejected_everywhere() -> Result<()> {
    let mut lexicon = hierarchy()?;
    assert!(matches!(lexicon.synset(""), Err(LexiconError::InvalidArgument(_))));
    assert!(matches!(
        lexicon.outbound_relations(""),
        Err(LexiconError::InvalidArgument(_))
    ));
    assert!(matches!(
        lexicon.add_relation("", "a", "hypernym"),
        Err(LexiconError::InvalidArgument(_))
    ));
    assert!(Synset::new("").is_err());
    Ok(())
}
