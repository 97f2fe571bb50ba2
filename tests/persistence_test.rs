use std::fs;

use lexigraph::error::{LexiconError, Result};
use lexigraph::lexicon::{Lexicon, LexiconConfig, LexiconSource, PersistFormat};
use lexigraph::storage;
use lexigraph::synset::{Pos, Sentiment, SumoType, Synset};
use tempfile::TempDir;

fn sample() -> Result<Lexicon> {
    let mut lexicon = Lexicon::new();
    lexicon.add_relation_type("hypernym")?;
    lexicon.add_relation_type("near_antonym")?;

    let mut tree = Synset::new("ENG30-00000001-n")?
        .with_pos(Pos::Noun)
        .with_definition("plantă lemnoasă <înaltă>")
        .with_literals(["arbore", "copac"])?;
    tree.set_senses(["1", "2.1"])?;
    tree.set_domain("botany");
    tree.set_sumo("Tree");
    tree.set_sumo_type(SumoType::Hypernym);
    tree.set_stamp(Some("Verginica Mititelu".to_string()));
    tree.set_sentiment(Sentiment::new(0.125, 0.125, 0.75)?);
    lexicon.add_synset(tree)?;

    let plant = Synset::new("ENG30-00000002-n")?
        .with_pos(Pos::Noun)
        .with_literals(["plantă"])?;
    lexicon.add_synset(plant)?;

    let grow = Synset::new("ENG30-00000003-v")?
        .with_pos(Pos::Verb)
        .with_literals(["crește"])?;
    lexicon.add_synset(grow)?;

    lexicon.add_relation("ENG30-00000001-n", "ENG30-00000002-n", "hypernym")?;
    lexicon.add_relation("ENG30-00000003-v", "ENG30-00000001-n", "near_antonym")?;
    Ok(lexicon)
}

fn assert_same_queries(left: &Lexicon, right: &Lexicon) -> Result<()> {
    assert_eq!(left.synsets(None, None), right.synsets(None, None));
    assert_eq!(left.synsets(None, Some(Pos::Verb)), right.synsets(None, Some(Pos::Verb)));
    assert_eq!(left.synsets(Some("copac"), None), right.synsets(Some("copac"), None));
    for id in left.synsets(None, None) {
        assert_eq!(left.synset(id)?, right.synset(id)?);
        assert_eq!(left.outbound_relations(id)?, right.outbound_relations(id)?);
        assert_eq!(left.inbound_relations(id)?, right.inbound_relations(id)?);
    }
    assert_eq!(left.stats(), right.stats());
    Ok(())
}

#[test]
fn test_binary_round_trip_preserves_queries() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("rown.bin");
    let original = sample()?;

    original.save(&path, PersistFormat::Binary)?;
    let mut loaded = Lexicon::new();
    loaded.load(&path, PersistFormat::Binary)?;

    assert_same_queries(&original, &loaded)?;
    assert_eq!(loaded.snapshot(), original.snapshot());
    Ok(())
}

#[test]
fn test_xml_round_trip_preserves_queries() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("rown.xml");
    let original = sample()?;

    original.save(&path, PersistFormat::Xml)?;
    let text = fs::read_to_string(&path)?;
    assert!(text.contains("<ILR>ENG30-00000002-n<TYPE>hypernym</TYPE>"));
    assert!(text.contains("&lt;înaltă&gt;"));

    let mut loaded = Lexicon::new();
    loaded.load(&path, PersistFormat::Xml)?;
    assert_same_queries(&original, &loaded)?;
    Ok(())
}

#[test]
fn test_load_replaces_previous_state() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("rown.bin");
    sample()?.save(&path, PersistFormat::Binary)?;

    let mut lexicon = Lexicon::new();
    lexicon.add_relation_type("domain")?;
    lexicon.add_synset(Synset::new("stale")?)?;
    lexicon.load(&path, PersistFormat::Binary)?;

    assert!(!lexicon.contains("stale"));
    assert!(!lexicon.relation_type_registry().contains("domain"));
    assert_eq!(lexicon.len(), 3);
    Ok(())
}

#[test]
fn test_failed_load_keeps_previous_state() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("broken.bin");
    fs::write(&path, b"LXGR garbage")?;

    let mut lexicon = sample()?;
    let err = lexicon.load(&path, PersistFormat::Binary).unwrap_err();
    assert!(matches!(err, LexiconError::MalformedPersistedState(_)));
    assert_eq!(lexicon.len(), 3);
    Ok(())
}

#[test]
fn test_missing_file_is_an_io_error() -> Result<()> {
    let dir = TempDir::new()?;
    let mut lexicon = Lexicon::new();
    for format in [PersistFormat::Xml, PersistFormat::Binary] {
        let err = lexicon.load(dir.path().join("missing"), format).unwrap_err();
        assert!(matches!(err, LexiconError::Io(_)));
    }
    Ok(())
}

#[test]
fn test_corrupted_binary_is_malformed() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("rown.bin");
    sample()?.save(&path, PersistFormat::Binary)?;

    let mut bytes = fs::read(&path)?;
    let last = bytes.len() - 10;
    bytes[last] ^= 0x55;
    fs::write(&path, &bytes)?;

    let err = Lexicon::new().load(&path, PersistFormat::Binary).unwrap_err();
    assert!(matches!(err, LexiconError::MalformedPersistedState(_)));
    Ok(())
}

#[test]
fn test_binary_with_invalid_synset_is_malformed() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("invalid.bin");

    let mut snapshot = sample()?.snapshot();
    let synset: Synset = serde_json::from_value(serde_json::json!({
        "id": "s9",
        "sentiment": { "positive": 0.9, "negative": 0.9, "objective": 0.9 },
        "literals": [{ "word": "x", "sense": "1" }, { "word": "x", "sense": "2" }]
    }))?;
    snapshot.synsets.push(synset);
    storage::write_snapshot(&path, PersistFormat::Binary, &snapshot)?;

    let mut lexicon = sample()?;
    let err = lexicon.load(&path, PersistFormat::Binary).unwrap_err();
    assert!(matches!(err, LexiconError::MalformedPersistedState(_)));
    assert!(!lexicon.contains("s9"));
    Ok(())
}

#[test]
fn test_xml_loader_accepts_parallel_edges_and_unregistered_labels() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("parallel.xml");
    fs::write(
        &path,
        r#"<ROWN>
  <SYNSET><ID>s1</ID><POS>n</POS><SYNONYM><LITERAL>lup_cenușiu<SENSE>1</SENSE></LITERAL></SYNONYM>
    <ILR>s2<TYPE>hypernym</TYPE></ILR>
    <ILR>s2<TYPE>category_domain</TYPE></ILR>
  </SYNSET>
  <SYNSET><ID>s2</ID><POS>n</POS><SYNONYM><LITERAL>animal<SENSE/></LITERAL></SYNONYM></SYNSET>
</ROWN>"#,
    )?;

    let mut lexicon = Lexicon::new();
    lexicon.load(&path, PersistFormat::Xml)?;

    assert_eq!(
        lexicon.outbound_relations("s1")?,
        vec![("s2", "hypernym"), ("s2", "category_domain")]
    );
    assert!(lexicon.relation_type_registry().contains("category_domain"));
    assert_eq!(lexicon.synsets(Some("lup"), None), vec!["s1"]);
    assert_eq!(lexicon.synsets(Some("cenușiu"), None), vec!["s1"]);
    Ok(())
}

#[test]
fn test_xml_loader_rejects_duplicate_ids_and_bad_tags() -> Result<()> {
    let dir = TempDir::new()?;
    let duplicate = dir.path().join("duplicate.xml");
    fs::write(
        &duplicate,
        "<ROWN><SYNSET><ID>s1</ID></SYNSET><SYNSET><ID>s1</ID></SYNSET></ROWN>",
    )?;
    let bad_pos = dir.path().join("bad_pos.xml");
    fs::write(&bad_pos, "<ROWN><SYNSET><ID>s1</ID><POS>q</POS></SYNSET></ROWN>")?;

    let mut lexicon = Lexicon::new();
    assert!(matches!(
        lexicon.load(&duplicate, PersistFormat::Xml),
        Err(LexiconError::MalformedPersistedState(_))
    ));
    assert!(matches!(
        lexicon.load(&bad_pos, PersistFormat::Xml),
        Err(LexiconError::MalformedPersistedState(_))
    ));
    Ok(())
}

#[test]
fn test_open_resolves_sources() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("bundled.xml");
    sample()?.save(&path, PersistFormat::Xml)?;

    let explicit = LexiconSource::Explicit {
        path: path.clone(),
        format: PersistFormat::Xml,
    };
    let lexicon = Lexicon::open(&explicit, LexiconConfig::default())?;
    assert_eq!(lexicon.len(), 3);

    let config = LexiconConfig::default().with_default_source(&path, PersistFormat::Xml);
    let lexicon = Lexicon::open(&LexiconSource::DefaultBundled, config)?;
    assert_eq!(lexicon.len(), 3);

    assert!(matches!(
        Lexicon::open(&LexiconSource::DefaultBundled, LexiconConfig::default()),
        Err(LexiconError::InvalidArgument(_))
    ));
    Ok(())
}

#[test]
fn test_config_from_json_changes_defaults() -> Result<()> {
    let dir = TempDir::new()?;
    let config_path = dir.path().join("lexigraph.json");
    fs::write(&config_path, r#"{"id_prefix": "RON-", "id_suffix": "", "root_relation": "near_antonym"}"#)?;

    let config = LexiconConfig::from_json_file(&config_path)?;
    let path = dir.path().join("rown.bin");
    sample()?.save(&path, PersistFormat::Binary)?;

    let lexicon = Lexicon::open(
        &LexiconSource::Explicit {
            path,
            format: PersistFormat::Binary,
        },
        config,
    )?;
    assert_eq!(lexicon.next_id()?, "RON-00000001");
    assert_eq!(
        lexicon.root_path("ENG30-00000003-v", None)?,
        vec!["ENG30-00000003-v", "ENG30-00000001-n"]
    );
    Ok(())
}
