use std::fmt::Write;

/// Step-by-step record of one calculation, rendered into `CalculationResult::details`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trace {
    sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    title: String,
    lines: Vec<String>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new titled section; subsequent lines belong to it.
    pub fn section(&mut self, title: impl Into<String>) {
        self.sections.push(Section {
            title: title.into(),
            lines: Vec::new(),
        });
    }

    pub fn line(&mut self, line: impl Into<String>) {
        match self.sections.last_mut() {
            Some(section) => section.lines.push(line.into()),
            None => self.sections.push(Section {
                title: String::new(),
                lines: vec![line.into()],
            }),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for (i, section) in self.sections.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            if !section.title.is_empty() {
                let _ = writeln!(out, "{}", section.title);
            }
            for line in &section.lines {
                let _ = writeln!(out, "  {line}");
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sections_in_order() {
        let mut trace = Trace::new();
        trace.section("Taxable standard");
        trace.line("ratio 43%");
        trace.section("Main tax");
        trace.line("raw 99000");
        assert_eq!(
            trace.render(),
            "Taxable standard\n  ratio 43%\n\nMain tax\n  raw 99000\n"
        );
    }

    #[test]
    fn line_without_section() {
        let mut trace = Trace::new();
        trace.line("orphan");
        assert_eq!(trace.render(), "  orphan\n");
    }
}
