//! Tagged XML encoding of a lexicon.
//!
//! ```xml
//! <ROWN>
//!   <SYNSET>
//!     <ID>ENG30-00001740-n</ID>
//!     <POS>n</POS>
//!     <SYNONYM>
//!       <LITERAL>entitate<SENSE>1</SENSE></LITERAL>
//!     </SYNONYM>
//!     <STAMP>...</STAMP>
//!     <ILR>ENG30-00002137-n<TYPE>hypernym</TYPE></ILR>
//!     <DEF>...</DEF>
//!     <DOMAIN>factotum</DOMAIN>
//!     <SUMO>Entity<TYPE>=</TYPE></SUMO>
//!     <SENTIWN><P>0</P><N>0</N><O>1</O></SENTIWN>
//!   </SYNSET>
//! </ROWN>
//! ```
//!
//! The reader accepts synset fields in any order; the writer always emits
//! them in the order above. The non-lexicalized flag has no element and is
//! not persisted in this format.

use std::collections::BTreeSet;
use std::io::Write;

use ahash::AHashMap;
use log::{debug, warn};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::reader::Reader;

use crate::error::{LexiconError, Result};
use crate::graph::RelationTriple;
use crate::lexicon::{LexiconConfig, LexiconSnapshot};
use crate::synset::{Pos, Sentiment, SumoType, Synset};

const ROOT: &str = "ROWN";
const SYNSET: &str = "SYNSET";

/// A parsed element: name, concatenated text, child elements.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: String) -> Self {
        Element {
            name,
            ..Default::default()
        }
    }

    fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.name == name)
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// Parse an XML document into a snapshot.
///
/// Relation labels found on `ILR` elements are registered as relation types.
pub fn decode(input: &str, config: &LexiconConfig) -> Result<LexiconSnapshot> {
    let root = parse_document(input)?;

    let mut snapshot = LexiconSnapshot::default();
    for element in &root.children {
        if element.name != SYNSET {
            debug!("Skipping unexpected <{}> element under <{}>", element.name, root.name);
            continue;
        }
        let synset = read_synset(element, config, &mut snapshot.relations)?;
        snapshot.synsets.push(synset);
    }

    let labels: BTreeSet<&str> = snapshot
        .relations
        .iter()
        .map(|relation| relation.label.as_str())
        .collect();
    snapshot.relation_types = labels.into_iter().map(String::from).collect();

    Ok(snapshot)
}

fn parse_document(input: &str) -> Result<Element> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            LexiconError::malformed(format!(
                "XML error at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(start) => stack.push(Element::new(element_name(&start)?)),
            Event::Empty(start) => {
                let element = Element::new(element_name(&start)?);
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| LexiconError::malformed(format!("invalid XML text: {e}")))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&text);
                }
            }
            Event::CData(data) => {
                let text = std::str::from_utf8(&data)
                    .map_err(|e| LexiconError::malformed(format!("invalid CDATA: {e}")))?;
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(text);
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| LexiconError::malformed("unbalanced closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(LexiconError::malformed(format!(
            "element <{}> is never closed",
            open.name
        )));
    }
    root.ok_or_else(|| LexiconError::malformed("document has no root element"))
}

fn element_name(start: &BytesStart<'_>) -> Result<String> {
    std::str::from_utf8(start.name().as_ref())
        .map(String::from)
        .map_err(|e| LexiconError::malformed(format!("invalid element name: {e}")))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None if root.is_none() => *root = Some(element),
        None => return Err(LexiconError::malformed("document has more than one root element")),
    }
    Ok(())
}

fn read_synset(
    element: &Element,
    config: &LexiconConfig,
    relations: &mut Vec<RelationTriple>,
) -> Result<Synset> {
    let id = element
        .child("ID")
        .map(|id| id.text.as_str())
        .ok_or_else(|| LexiconError::malformed("<SYNSET> without <ID>"))?;
    let mut synset = Synset::new(id)
        .map_err(|_| LexiconError::malformed("<SYNSET> with an empty <ID>"))?;

    for field in &element.children {
        match field.name.as_str() {
            "ID" => {}
            "POS" => synset.set_pos(field.text.parse::<Pos>()?),
            "SYNONYM" => read_literals(&mut synset, field, config)?,
            "STAMP" => synset.set_stamp(non_empty(field).map(String::from)),
            "ILR" => {
                let label = field
                    .child("TYPE")
                    .map(|label| label.text.as_str())
                    .filter(|label| !label.is_empty())
                    .ok_or_else(|| {
                        LexiconError::malformed(format!("relation of '{id}' has no <TYPE>"))
                    })?;
                if field.text.is_empty() {
                    return Err(LexiconError::malformed(format!(
                        "relation of '{id}' has no target"
                    )));
                }
                relations.push(RelationTriple::new(id, label, field.text.as_str()));
            }
            "DEF" => {
                if let Some(definition) = non_empty(field) {
                    synset.set_definition(definition);
                }
            }
            "DOMAIN" => {
                if let Some(domain) = non_empty(field) {
                    synset.set_domain(domain);
                }
            }
            "SUMO" => {
                if let Some(sumo) = non_empty(field) {
                    synset.set_sumo(sumo);
                }
                if let Some(kind) = field.child("TYPE") {
                    synset.set_sumo_type(kind.text.parse::<SumoType>()?);
                }
            }
            "SENTIWN" => synset.set_sentiment(read_sentiment(field, id)?),
            other => debug!("Ignoring unknown <{other}> in synset '{id}'"),
        }
    }

    Ok(synset)
}

fn read_literals(synset: &mut Synset, synonym: &Element, config: &LexiconConfig) -> Result<()> {
    for literal in synonym.children_named("LITERAL") {
        if literal.text.is_empty() {
            return Err(LexiconError::malformed(format!(
                "synset '{}' has an empty <LITERAL>",
                synset.id()
            )));
        }
        let sense = literal
            .child("SENSE")
            .map(|sense| sense.text.as_str())
            .unwrap_or("");
        synset.add_literal(literal.text.as_str(), sense).map_err(|e| {
            LexiconError::malformed(format!("synset '{}': {e}", synset.id()))
        })?;
    }

    if config.split_compound_literals {
        let compounds: Vec<String> = synset
            .words()
            .filter(|word| word.contains('_'))
            .map(String::from)
            .collect();
        for compound in compounds {
            for part in compound.split('_').filter(|part| !part.is_empty()) {
                if !synset.has_literal(part) {
                    synset.add_literal(part, "")?;
                }
            }
        }
    }

    Ok(())
}

/// Element text, or `None` for an empty element.
fn non_empty(element: &Element) -> Option<&str> {
    Some(element.text.as_str()).filter(|text| !text.is_empty())
}

fn read_sentiment(element: &Element, id: &str) -> Result<Sentiment> {
    let score = |name: &str| -> Result<f64> {
        let text = element.child(name).map(|score| score.text.as_str()).ok_or_else(|| {
            LexiconError::malformed(format!("sentiment of '{id}' has no <{name}>"))
        })?;
        text.trim().parse::<f64>().map_err(|e| {
            LexiconError::malformed(format!("sentiment of '{id}' has invalid <{name}> '{text}': {e}"))
        })
    };

    Sentiment::new(score("P")?, score("N")?, score("O")?)
        .map_err(|e| LexiconError::malformed(format!("sentiment of '{id}': {e}")))
}

/// Write a snapshot as an indented XML document.
///
/// Relations are written under their source synset; relations whose source
/// has no synset cannot be represented and are dropped with a warning.
pub fn encode<W: Write>(writer: W, snapshot: &LexiconSnapshot) -> Result<W> {
    let mut outbound: AHashMap<&str, Vec<&RelationTriple>> = AHashMap::new();
    for relation in &snapshot.relations {
        outbound
            .entry(relation.source.as_str())
            .or_default()
            .push(relation);
    }

    let mut xml = Writer::new_with_indent(writer, b' ', 2);
    emit(
        &mut xml,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;
    open(&mut xml, ROOT)?;

    let mut written = 0usize;
    for synset in &snapshot.synsets {
        let relations = outbound.remove(synset.id()).unwrap_or_default();
        written += relations.len();
        write_synset(&mut xml, synset, &relations)?;
    }

    close(&mut xml, ROOT)?;

    let dropped = snapshot.relations.len() - written;
    if dropped > 0 {
        warn!("{dropped} relations without a source synset were not written");
    }

    let mut writer = xml.into_inner();
    writer.flush()?;
    Ok(writer)
}

fn write_synset<W: Write>(
    xml: &mut Writer<W>,
    synset: &Synset,
    relations: &[&RelationTriple],
) -> Result<()> {
    open(xml, SYNSET)?;
    text_element(xml, "ID", synset.id())?;
    if let Some(pos) = synset.pos() {
        text_element(xml, "POS", &pos.to_string())?;
    }

    open(xml, "SYNONYM")?;
    for literal in synset.literals() {
        open(xml, "LITERAL")?;
        text(xml, &literal.word)?;
        text_element(xml, "SENSE", &literal.sense)?;
        close(xml, "LITERAL")?;
    }
    close(xml, "SYNONYM")?;

    if let Some(stamp) = synset.stamp() {
        text_element(xml, "STAMP", stamp)?;
    }

    for relation in relations {
        open(xml, "ILR")?;
        text(xml, &relation.target)?;
        text_element(xml, "TYPE", &relation.label)?;
        close(xml, "ILR")?;
    }

    if let Some(definition) = synset.definition() {
        text_element(xml, "DEF", definition)?;
    }
    if let Some(domain) = synset.domain() {
        text_element(xml, "DOMAIN", domain)?;
    }
    if let Some(sumo) = synset.sumo() {
        open(xml, "SUMO")?;
        text(xml, sumo)?;
        if let Some(kind) = synset.sumo_type() {
            text_element(xml, "TYPE", &kind.to_string())?;
        }
        close(xml, "SUMO")?;
    }
    if let Some(sentiment) = synset.sentiment() {
        open(xml, "SENTIWN")?;
        text_element(xml, "P", &sentiment.positive().to_string())?;
        text_element(xml, "N", &sentiment.negative().to_string())?;
        text_element(xml, "O", &sentiment.objective().to_string())?;
        close(xml, "SENTIWN")?;
    }

    close(xml, SYNSET)
}

fn emit<W: Write>(xml: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    xml.write_event(event)
        .map_err(|e| LexiconError::serialization(format!("XML write failed: {e}")))
}

fn open<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    emit(xml, Event::Start(BytesStart::new(name)))
}

fn close<W: Write>(xml: &mut Writer<W>, name: &str) -> Result<()> {
    emit(xml, Event::End(BytesEnd::new(name)))
}

fn text<W: Write>(xml: &mut Writer<W>, content: &str) -> Result<()> {
    emit(xml, Event::Text(BytesText::new(content)))
}

fn text_element<W: Write>(xml: &mut Writer<W>, name: &str, content: &str) -> Result<()> {
    open(xml, name)?;
    text(xml, content)?;
    close(xml, name)
}
