//! Entity model - the semantic view of one parsed file.
//!
//! Entities are rebuilt from scratch on every parse; nothing here survives
//! a re-parse. Each entity carries the source ranges consumers need for
//! navigation, folding and diagnostics.

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use crate::genetics::SequenceKind;
use crate::parser::{self, AstNode, Parse, SyntaxKind};

/// The five structural gene property names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GenePropertyKey {
    Promoter,
    StartCodon,
    StopCodon,
    CodingSequence,
    Terminator,
}

impl GenePropertyKey {
    pub const ALL: [GenePropertyKey; 5] = [
        GenePropertyKey::Promoter,
        GenePropertyKey::StartCodon,
        GenePropertyKey::StopCodon,
        GenePropertyKey::CodingSequence,
        GenePropertyKey::Terminator,
    ];

    pub fn from_syntax_kind(kind: SyntaxKind) -> Option<Self> {
        match kind {
            SyntaxKind::PROMOTER_KW => Some(Self::Promoter),
            SyntaxKind::START_CODON_KW => Some(Self::StartCodon),
            SyntaxKind::STOP_CODON_KW => Some(Self::StopCodon),
            SyntaxKind::CODING_SEQUENCE_KW => Some(Self::CodingSequence),
            SyntaxKind::TERMINATOR_KW => Some(Self::Terminator),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Promoter => "Promoter",
            Self::StartCodon => "Start_Codon",
            Self::StopCodon => "Stop_Codon",
            Self::CodingSequence => "Coding_Sequence",
            Self::Terminator => "Terminator",
        }
    }

    /// Whether values of this property must be nucleotide sequences.
    pub fn is_nucleotide_valued(self) -> bool {
        matches!(self, Self::StartCodon | Self::StopCodon | Self::CodingSequence)
    }

    /// Display form with underscores as spaces, e.g. "Start Codon".
    pub fn display_name(self) -> String {
        self.as_str().replace('_', " ")
    }
}

/// A `key = value` property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Property {
    pub key: SmolStr,
    pub key_range: TextRange,
    /// The logical value (escapes resolved, continuations joined).
    pub value: Option<String>,
    pub value_range: Option<TextRange>,
    pub range: TextRange,
    pub doc: Option<String>,
    /// The closest comment line above the property.
    pub location: Option<String>,
}

/// A typed sequence declaration, e.g. `DNASeq dna1 = "ATGC"`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub kind: SequenceKind,
    pub name: SmolStr,
    pub name_range: TextRange,
    /// The raw text between the quotes; may contain whitespace and invalid characters.
    pub sequence: String,
    pub sequence_range: Option<TextRange>,
    pub range: TextRange,
    pub doc: Option<String>,
    pub location: Option<String>,
}

impl Declaration {
    /// The sequence with whitespace removed and letters uppercased.
    pub fn normalized_sequence(&self) -> String {
        self.sequence
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| c.to_ascii_uppercase())
            .collect()
    }
}

/// One property inside a gene body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneProperty {
    pub key: GenePropertyKey,
    pub key_range: TextRange,
    /// Absent for `Promoter;` style properties.
    pub value: Option<String>,
    pub value_range: Option<TextRange>,
    pub range: TextRange,
}

/// `Gene name { ... }`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneDefinition {
    pub name: SmolStr,
    pub name_range: TextRange,
    pub properties: Vec<GeneProperty>,
    pub body_range: Option<TextRange>,
    pub range: TextRange,
    pub doc: Option<String>,
    pub location: Option<String>,
}

impl GeneDefinition {
    pub fn property(&self, key: GenePropertyKey) -> Option<&GeneProperty> {
        self.properties.iter().find(|p| p.key == key)
    }
}

/// A top-level entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    Property(Property),
    Declaration(Declaration),
    Gene(GeneDefinition),
}

impl Entity {
    /// The name other files can refer to this entity by.
    pub fn key(&self) -> &str {
        match self {
            Entity::Property(p) => &p.key,
            Entity::Declaration(d) => &d.name,
            Entity::Gene(g) => &g.name,
        }
    }

    pub fn key_range(&self) -> TextRange {
        match self {
            Entity::Property(p) => p.key_range,
            Entity::Declaration(d) => d.name_range,
            Entity::Gene(g) => g.name_range,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            Entity::Property(p) => p.range,
            Entity::Declaration(d) => d.range,
            Entity::Gene(g) => g.range,
        }
    }

    pub fn doc(&self) -> Option<&str> {
        match self {
            Entity::Property(p) => p.doc.as_deref(),
            Entity::Declaration(d) => d.doc.as_deref(),
            Entity::Gene(g) => g.doc.as_deref(),
        }
    }

    pub fn location(&self) -> Option<&str> {
        match self {
            Entity::Property(p) => p.location.as_deref(),
            Entity::Declaration(d) => d.location.as_deref(),
            Entity::Gene(g) => g.location.as_deref(),
        }
    }

    /// The value a literal reference to this entity folds to.
    pub fn value(&self) -> Option<&str> {
        match self {
            Entity::Property(p) => p.value.as_deref(),
            Entity::Declaration(d) => d.sequence_range.map(|_| d.sequence.as_str()),
            Entity::Gene(_) => None,
        }
    }

    /// Properties and declarations define keys for the project index.
    pub fn is_definition(&self) -> bool {
        matches!(self, Entity::Property(_) | Entity::Declaration(_))
    }
}

/// All entities of one file, in source order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityTree {
    pub file: FileId,
    pub entities: Vec<Entity>,
}

impl EntityTree {
    pub fn empty(file: FileId) -> Self {
        Self {
            file,
            entities: Vec::new(),
        }
    }

    /// Build the entity tree for a parsed file.
    ///
    /// Entities whose name is missing (already a syntax error) are left out.
    pub fn lower(file: FileId, parse: &Parse) -> Self {
        let entities = parse
            .tree()
            .entities()
            .filter_map(|entity| match entity {
                parser::Entity::Property(p) => lower_property(&p).map(Entity::Property),
                parser::Entity::Declaration(d) => lower_declaration(&d).map(Entity::Declaration),
                parser::Entity::Gene(g) => lower_gene(&g).map(Entity::Gene),
            })
            .collect();
        Self { file, entities }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Entity> {
        self.entities.get(index)
    }

    /// The entity whose range contains `offset`.
    pub fn entity_at(&self, offset: crate::base::TextSize) -> Option<(usize, &Entity)> {
        self.entities
            .iter()
            .enumerate()
            .find(|(_, e)| e.range().contains_inclusive(offset))
    }
}

fn lower_property(property: &parser::Property) -> Option<Property> {
    let key_token = property.key_token()?;
    Some(Property {
        key: property.key()?.into(),
        key_range: key_token.text_range(),
        value: property.value(),
        value_range: property.value_range(),
        range: property.syntax().text_range(),
        doc: parser::doc_comment(property.syntax()),
        location: parser::leading_comment(property.syntax()),
    })
}

fn lower_declaration(declaration: &parser::Declaration) -> Option<Declaration> {
    let kind = SequenceKind::from_keyword(declaration.type_keyword()?.text())?;
    let name = declaration.name()?;
    let sequence = declaration.sequence();
    Some(Declaration {
        kind,
        name: name.text().into(),
        name_range: name.text_range(),
        sequence: sequence
            .as_ref()
            .map(|s| s.content().to_string())
            .unwrap_or_default(),
        sequence_range: sequence.as_ref().map(|s| s.content_range()),
        range: declaration.syntax().text_range(),
        doc: parser::doc_comment(declaration.syntax()),
        location: parser::leading_comment(declaration.syntax()),
    })
}

fn lower_gene(gene: &parser::GeneDefinition) -> Option<GeneDefinition> {
    let name = gene.name()?;
    let properties = gene
        .properties()
        .filter_map(|prop| {
            let key_token = prop.name()?;
            let value = prop.value();
            Some(GeneProperty {
                key: GenePropertyKey::from_syntax_kind(key_token.kind())?,
                key_range: key_token.text_range(),
                value: value.as_ref().map(|v| v.value()),
                value_range: value.as_ref().map(|v| v.content_range()),
                range: prop.syntax().text_range(),
            })
        })
        .collect();
    Some(GeneDefinition {
        name: name.text().into(),
        name_range: name.text_range(),
        properties,
        body_range: gene.body().map(|b| b.syntax().text_range()),
        range: gene.syntax().text_range(),
        doc: parser::doc_comment(gene.syntax()),
        location: parser::leading_comment(gene.syntax()),
    })
}
