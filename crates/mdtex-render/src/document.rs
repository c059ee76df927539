//! Standalone `TeX` document wrapping a `TikZ` block.

/// Preamble used around the diagram source.
///
/// The default produces:
///
/// ```text
/// \documentclass[dvisvgm]{standalone}
/// \usepackage{tikz}
/// <source>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTemplate {
    /// Options for the `standalone` class. `dvisvgm` selects the matching driver.
    pub class_options: Vec<String>,
    /// Packages loaded with `\usepackage`.
    pub packages: Vec<String>,
    /// Extra preamble lines inserted verbatim after the packages.
    pub preamble: Vec<String>,
}

impl Default for DocumentTemplate {
    fn default() -> Self {
        Self {
            class_options: vec!["dvisvgm".to_owned()],
            packages: vec!["tikz".to_owned()],
            preamble: Vec::new(),
        }
    }
}

impl DocumentTemplate {
    /// Build the full document. `source` is spliced in verbatim.
    #[must_use]
    pub fn build(&self, source: &str) -> String {
        let mut doc = String::with_capacity(source.len() + 128);

        if self.class_options.is_empty() {
            doc.push_str("\\documentclass{standalone}\n");
        } else {
            doc.push_str("\\documentclass[");
            doc.push_str(&self.class_options.join(","));
            doc.push_str("]{standalone}\n");
        }

        for package in &self.packages {
            doc.push_str("\\usepackage{");
            doc.push_str(package);
            doc.push_str("}\n");
        }

        for line in &self.preamble {
            doc.push_str(line);
            doc.push('\n');
        }

        doc.push_str(source);
        doc.push('\n');
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_document() {
        let source = "\\begin{tikzpicture}\\draw (0,0) -- (1,1);\\end{tikzpicture}";
        assert_eq!(
            DocumentTemplate::default().build(source),
            format!("\\documentclass[dvisvgm]{{standalone}}\n\\usepackage{{tikz}}\n{source}\n")
        );
    }

    #[test]
    fn test_source_is_not_escaped() {
        let source = "\\usetikzlibrary{calc} % & $ # _ { }";
        assert!(DocumentTemplate::default().build(source).contains(source));
    }

    #[test]
    fn test_custom_preamble() {
        let template = DocumentTemplate {
            class_options: vec!["dvisvgm".to_owned(), "border=2pt".to_owned()],
            packages: vec!["tikz".to_owned(), "pgfplots".to_owned()],
            preamble: vec!["\\usetikzlibrary{arrows.meta}".to_owned()],
        };
        assert_eq!(
            template.build("X"),
            "\\documentclass[dvisvgm,border=2pt]{standalone}\n\
             \\usepackage{tikz}\n\
             \\usepackage{pgfplots}\n\
             \\usetikzlibrary{arrows.meta}\n\
             X\n"
        );
    }

    #[test]
    fn test_no_class_options() {
        let template = DocumentTemplate {
            class_options: Vec::new(),
            ..DocumentTemplate::default()
        };
        assert!(template.build("").starts_with("\\documentclass{standalone}\n"));
    }
}
