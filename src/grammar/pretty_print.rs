use std::collections::HashSet;

use crowbook_text_processing::escape;
use serde::Serialize;

use super::{
    analysis::Analysis, first::FirstSets, follow::FollowSets, Grammar, END_MARK_INDEX, EPSILON,
    EPSILON_INDEX,
};

fn tex_symbols(symbols: &[&str], separator: &str) -> String {
    symbols
        .iter()
        .map(|s| escape::tex(*s))
        .collect::<Vec<_>>()
        .join(separator)
        .replace(EPSILON, r"\epsilon")
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductionOutput<'a> {
    pub left: &'a str,
    pub rights: Vec<Vec<&'a str>>,
}

impl ProductionOutput<'_> {
    pub fn to_plaintext(&self, left_width: usize, multiline: bool) -> String {
        self.rights
            .iter()
            .map(|right| {
                if right.is_empty() {
                    EPSILON.to_string()
                } else {
                    right.join(" ")
                }
            })
            .enumerate()
            .map(|(i, right)| {
                if i == 0 {
                    format!("{:>width$} -> {}", self.left, right, width = left_width)
                } else if multiline {
                    format!("{:>width$}  | {}", "", right, width = left_width)
                } else {
                    format!(" | {}", right)
                }
            })
            .collect::<Vec<_>>()
            .join(if multiline { "\n" } else { "" })
    }

    pub fn to_latex(&self, and_sign: bool) -> String {
        if self.rights.is_empty() {
            return String::new();
        }

        let left = if and_sign {
            format!("{} & \\rightarrow &", escape::tex(self.left))
        } else {
            format!("{} \\rightarrow ", escape::tex(self.left))
        };
        let right = self
            .rights
            .iter()
            .map(|right| {
                if right.is_empty() {
                    r"\epsilon".to_string()
                } else {
                    tex_symbols(right, " \\ ")
                }
            })
            .collect::<Vec<_>>()
            .join(" \\mid ");

        left + &right
    }
}

#[derive(Serialize)]
pub struct ProductionOutputVec<'a> {
    productions: Vec<ProductionOutput<'a>>,
}

impl ProductionOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        let left_max_len = self
            .productions
            .iter()
            .map(|p| p.left.len())
            .max()
            .unwrap_or(0);
        self.productions
            .iter()
            .map(|s| s.to_plaintext(left_max_len, true))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_latex(&self) -> String {
        std::iter::once("\\[\\begin{array}{cll}".to_string())
            .chain(self.productions.iter().map(|s| s.to_latex(true)))
            .chain(std::iter::once("\\end{array}\\]".to_string()))
            .collect::<Vec<String>>()
            .join("\\\\\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Names of the symbols in `set`, terminals sorted first and the markers last.
fn sorted_names<'a>(grammar: &'a Grammar, set: &HashSet<usize>) -> Vec<&'a str> {
    let mut names: Vec<&str> = set
        .iter()
        .filter(|&&idx| idx != EPSILON_INDEX && idx != END_MARK_INDEX)
        .map(|&idx| grammar.get_symbol_name(idx))
        .collect();
    names.sort();
    for marker in [END_MARK_INDEX, EPSILON_INDEX] {
        if set.contains(&marker) {
            names.push(grammar.get_symbol_name(marker));
        }
    }
    names
}

#[derive(Serialize)]
struct SetOutput<'a> {
    name: &'a str,
    set: Vec<&'a str>,
}

/// One named set (FIRST or FOLLOW) per non-terminal.
#[derive(Serialize)]
pub struct SetOutputVec<'a> {
    title: &'static str,
    data: Vec<SetOutput<'a>>,
}

impl SetOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| format!("{}({}) = {{ {} }}", self.title, s.name, s.set.join(", ")))
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        self.data
            .iter()
            .map(|s| {
                format!(
                    "\\mathrm{{{}}}({}) = \\{{ {} \\}}",
                    self.title,
                    escape::tex(s.name),
                    tex_symbols(&s.set, ",\\ ")
                )
            })
            .collect::<Vec<_>>()
            .join("\\\\\n")
    }
}

#[derive(Serialize)]
struct FirstFollowOutput<'a> {
    name: &'a str,
    nullable: bool,
    first: Vec<&'a str>,
    follow: Vec<&'a str>,
}

impl FirstFollowOutput<'_> {
    fn to_plaintext(&self) -> String {
        format!(
            "{} | {} | {} | {}",
            self.name,
            self.nullable,
            self.first.join(", "),
            self.follow.join(", ")
        )
    }

    fn to_latex(&self) -> String {
        format!(
            "{} & {} & {} & {}",
            escape::tex(self.name),
            self.nullable,
            tex_symbols(&self.first, r"\ "),
            tex_symbols(&self.follow, r"\ ")
        )
    }
}

#[derive(Serialize)]
pub struct FirstFollowOutputVec<'a> {
    data: Vec<FirstFollowOutput<'a>>,
}

impl FirstFollowOutputVec<'_> {
    pub fn to_plaintext(&self) -> String {
        self.data
            .iter()
            .map(|s| s.to_plaintext())
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_latex(&self) -> String {
        let content = self
            .data
            .iter()
            .map(|e| e.to_latex())
            .collect::<Vec<_>>()
            .join("\\\\\n ");

        "\\begin{tabular}{c|c|c|c}\n".to_string()
            + "Symbol & Nullable & First & Follow\\\\\\hline\n"
            + &content
            + "\\\\\n\\end{tabular}"
    }
}

impl Grammar {
    pub fn to_production_output_vec(&self) -> ProductionOutputVec {
        let productions = self
            .non_terminal_iter()
            .map(|nt| ProductionOutput {
                left: nt.name.as_str(),
                rights: nt
                    .productions
                    .iter()
                    .map(|p| self.production_to_vec_str(p))
                    .collect(),
            })
            .collect();
        ProductionOutputVec { productions }
    }

    pub fn to_first_output_vec(&self, firsts: &FirstSets) -> SetOutputVec {
        let data = self
            .non_terminal_iter()
            .map(|nt| SetOutput {
                name: nt.name.as_str(),
                set: sorted_names(self, firsts.get(nt.index)),
            })
            .collect();
        SetOutputVec {
            title: "FIRST",
            data,
        }
    }

    pub fn to_follow_output_vec(&self, follows: &FollowSets) -> SetOutputVec {
        let data = self
            .non_terminal_iter()
            .map(|nt| SetOutput {
                name: nt.name.as_str(),
                set: sorted_names(self, follows.get(nt.index)),
            })
            .collect();
        SetOutputVec {
            title: "FOLLOW",
            data,
        }
    }

    pub fn to_first_follow_output_vec(&self, analysis: &Analysis) -> FirstFollowOutputVec {
        let data = self
            .non_terminal_iter()
            .map(|nt| FirstFollowOutput {
                name: nt.name.as_str(),
                nullable: analysis.first.is_nullable(nt.index),
                first: sorted_names(self, analysis.first.get(nt.index)),
                follow: sorted_names(self, analysis.follow.get(nt.index)),
            })
            .collect();
        FirstFollowOutputVec { data }
    }
}
