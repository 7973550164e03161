//! A small builder for YARRRML mapping blocks.
//!
//! Every block is written with the same indentation so documents assembled
//! from many handlers stay well-formed:
//!
//! ```text
//!   Name:
//!     sources:
//!       - ['people.csv~csv']
//!     s: base:Thing_$(case_id)
//!     po:
//!       - [a, ex:Thing~iri]
//!       - p: ex:link
//!         o:
//!           - function: ex:build
//!             parameters:
//!               - parameter: grel:valueParam
//!                 value: $(case_id)
//!             type: iri
//! ```

use std::fmt;

/// Indentation unit.
const INDENT: &str = "  ";

/// Materializer reference to a column of the source row.
pub fn placeholder(column: &str) -> String {
    format!("$({column})")
}

/// IRI-typed object term.
pub fn iri(term: impl fmt::Display) -> String {
    format!("{term}~iri")
}

/// Function invocation evaluated by the materializer, always returning an IRI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    function: String,
    parameters: Vec<(String, String)>,
}

impl FunctionCall {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            parameters: Vec::new(),
        }
    }

    /// Append a parameter; order is preserved.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push((name.into(), value.into()));
        self
    }

    /// Write the call as a list item at `depth` indentation units.
    fn write_item(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let pad = INDENT.repeat(depth);
        writeln!(f, "{pad}- function: {}", self.function)?;
        writeln!(f, "{pad}  parameters:")?;
        for (name, value) in &self.parameters {
            writeln!(f, "{pad}    - parameter: {name}")?;
            writeln!(f, "{pad}      value: {value}")?;
        }
        writeln!(f, "{pad}  type: iri")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Subject {
    Template(String),
    Function(FunctionCall),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PredicateObject {
    /// `- [predicate, object(, datatype)]`
    List(Vec<String>),
    /// `- p: predicate` with a function-valued object.
    Function { predicate: String, call: FunctionCall },
}

/// One named mapping block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleBlock {
    name: String,
    source: String,
    subject: Subject,
    po: Vec<PredicateObject>,
}

impl RuleBlock {
    /// Block whose subject is an IRI template.
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            subject: Subject::Template(subject.into()),
            po: Vec::new(),
        }
    }

    /// Block whose subject IRI is computed by a function.
    pub fn with_subject_function(
        name: impl Into<String>,
        source: impl Into<String>,
        call: FunctionCall,
    ) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            subject: Subject::Function(call),
            po: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `- [predicate, object]`
    pub fn pair(mut self, predicate: impl Into<String>, object: impl Into<String>) -> Self {
        self.po
            .push(PredicateObject::List(vec![predicate.into(), object.into()]));
        self
    }

    /// `- [predicate, value, datatype]`
    pub fn literal(
        mut self,
        predicate: impl Into<String>,
        value: impl Into<String>,
        datatype: impl Into<String>,
    ) -> Self {
        self.po.push(PredicateObject::List(vec![
            predicate.into(),
            value.into(),
            datatype.into(),
        ]));
        self
    }

    /// Predicate whose object is produced by `call`.
    pub fn function(mut self, predicate: impl Into<String>, call: FunctionCall) -> Self {
        self.po.push(PredicateObject::Function {
            predicate: predicate.into(),
            call,
        });
        self
    }

    /// Number of predicate-object entries.
    pub fn len(&self) -> usize {
        self.po.len()
    }

    pub fn is_empty(&self) -> bool {
        self.po.is_empty()
    }
}

impl fmt::Display for RuleBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{INDENT}{}:", self.name)?;
        writeln!(f, "{INDENT}{INDENT}sources:")?;
        writeln!(f, "{INDENT}{INDENT}{INDENT}- ['{}~csv']", self.source)?;
        match &self.subject {
            Subject::Template(template) => writeln!(f, "{INDENT}{INDENT}s: {template}")?,
            Subject::Function(call) => {
                writeln!(f, "{INDENT}{INDENT}s:")?;
                call.write_item(f, 3)?;
            }
        }
        writeln!(f, "{INDENT}{INDENT}po:")?;
        for entry in &self.po {
            match entry {
                PredicateObject::List(items) => {
                    writeln!(f, "{INDENT}{INDENT}{INDENT}- [{}]", items.join(", "))?;
                }
                PredicateObject::Function { predicate, call } => {
                    writeln!(f, "{INDENT}{INDENT}{INDENT}- p: {predicate}")?;
                    writeln!(f, "{INDENT}{INDENT}{INDENT}  o:")?;
                    call.write_item(f, 5)?;
                }
            }
        }
        Ok(())
    }
}
