//! Toy script runner.
//!
//! `simulate` scans Python-looking source line by line and fakes the output
//! of a handful of statement shapes. Nothing is evaluated: it only knows
//! `print(...)`, plain assignments, `for ... range(n)` headers and `def`
//! lines.

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static PRINT_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"print\(([^)]+)\)").unwrap());
static RANGE_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"range\((\d+)\)").unwrap());
static DEF_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"def\s+(\w+)").unwrap());
static NUMBER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?$").unwrap());

/// Output when a run printed nothing.
pub const NO_OUTPUT: &str = "# Script erfolgreich ausgeführt (keine Ausgabe generiert)\n";

/// Trailer appended to every run.
pub const END_MARKER: &str = "--- Ausführung beendet ---";

/// A starter script offered in the template gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptTemplate {
    /// Gallery title.
    pub name: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// Source loaded into the editor.
    pub code: &'static str,
}

/// Built-in starter scripts.
pub const TEMPLATES: [ScriptTemplate; 6] = [
    ScriptTemplate {
        name: "Hello World",
        description: "Einfaches Hello World Beispiel",
        code: "print(\"Hello World!\")\nprint(\"Willkommen beim Script Runner!\")",
    },
    ScriptTemplate {
        name: "Variablen & Eingabe",
        description: "Arbeiten mit Variablen und Benutzereingaben",
        code: "# Variablen definieren\nname = \"Python\"\nversion = 3.9\n\n# Ausgabe formatieren\n\
print(f\"Sprache: {name}\")\nprint(f\"Version: {version}\")\n\n# Benutzereingabe simulieren\n\
# name = input(\"Wie heißt du? \")\n# print(f\"Hallo {name}!\")",
    },
    ScriptTemplate {
        name: "Schleifen",
        description: "For- und While-Schleifen",
        code: "# For-Schleife\nprint(\"For-Schleife:\")\nfor i in range(5):\n    print(f\"Zahl: {i}\")\n\n\
# While-Schleife\nprint(\"\\nWhile-Schleife:\")\ncount = 0\nwhile count < 3:\n    print(f\"Count: {count}\")\n    count += 1",
    },
    ScriptTemplate {
        name: "Listen & Dictionaries",
        description: "Arbeiten mit Listen und Dictionaries",
        code: "# Listen\nfruits = [\"Apfel\", \"Banane\", \"Orange\"]\nprint(\"Früchte:\", fruits)\n\n\
for fruit in fruits:\n    print(f\"- {fruit}\")\n\n# Dictionary\nperson = {\n    \"name\": \"Max\",\n    \"age\": 25,\n\
    \"city\": \"Berlin\"\n}\n\nfor key, value in person.items():\n    print(f\"{key}: {value}\")",
    },
    ScriptTemplate {
        name: "Funktionen",
        description: "Funktionen definieren und verwenden",
        code: "# Einfache Funktion\ndef greet(name):\n    return f\"Hallo {name}!\"\n\n\
# Funktion mit mehreren Parametern\ndef add_numbers(a, b):\n    return a + b\n\n# Funktionen aufrufen\n\
print(greet(\"Python\"))\nprint(f\"5 + 3 = {add_numbers(5, 3)}\")\n\n# Lambda Funktion\nsquare = lambda x: x ** 2\n\
print(f\"4 zum Quadrat = {square(4)}\")",
    },
    ScriptTemplate {
        name: "Mathematik",
        description: "Mathematische Operationen und Berechnungen",
        code: "import math\n\n# Grundrechenarten\na, b = 10, 3\nprint(f\"Addition: {a} + {b} = {a + b}\")\n\
print(f\"Subtraktion: {a} - {b} = {a - b}\")\nprint(f\"Multiplikation: {a} * {b} = {a * b}\")\n\
print(f\"Division: {a} / {b} = {a / b:.2f}\")\n\n# Erweiterte Mathematik\nprint(f\"Quadratwurzel von 16: {math.sqrt(16)}\")\n\
print(f\"Pi: {math.pi:.4f}\")\nprint(f\"Sinus von 90°: {math.sin(math.radians(90))}\")",
    },
];

/// A value bound by an assignment line.
#[derive(Debug, Clone, PartialEq)]
enum Value {
    Text(String),
    Number(f64),
}

impl Value {
    fn parse(raw: &str) -> Self {
        if let Some(inner) = quoted(raw, '"').or_else(|| quoted(raw, '\'')) {
            return Self::Text(inner.to_string());
        }
        if NUMBER_PATTERN.is_match(raw) {
            if let Ok(n) = raw.parse::<f64>() {
                return Self::Number(n);
            }
        }
        Self::Text(raw.to_string())
    }

    /// Empty strings and zero do not count as a bound value when printing
    /// a bare name.
    fn is_truthy(&self) -> bool {
        match self {
            Self::Text(s) => !s.is_empty(),
            Self::Number(n) => *n != 0.0,
        }
    }

    fn render(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            #[allow(clippy::cast_possible_truncation)]
            Self::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => format!("{}", *n as i64),
            Self::Number(n) => n.to_string(),
        }
    }
}

/// The text between matching quotes, if `s` is wrapped in `quote`.
fn quoted(s: &str, quote: char) -> Option<&str> {
    if s.starts_with(quote) && s.ends_with(quote) {
        Some(s.get(1..s.len() - 1).unwrap_or(""))
    } else {
        None
    }
}

/// Variables in first-assignment order.
#[derive(Debug, Default)]
struct Variables(Vec<(String, Value)>);

impl Variables {
    fn set(&mut self, name: &str, value: Value) {
        match self.0.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.0.push((name.to_string(), value)),
        }
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    fn interpolate(&self, template: &str) -> String {
        self.0.iter().fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("{{{name}}}"), &value.render())
        })
    }
}

fn print_line(argument: &str, vars: &Variables) -> String {
    if let Some(inner) = quoted(argument, '"').or_else(|| quoted(argument, '\'')) {
        return inner.to_string();
    }
    if argument.starts_with("f\"") || argument.starts_with("f'") {
        let body = argument.get(2..argument.len() - 1).unwrap_or("");
        return vars.interpolate(body);
    }
    match vars.get(argument) {
        Some(value) if value.is_truthy() => value.render(),
        _ => argument.to_string(),
    }
}

/// Fake a run of `source` and return its output.
///
/// # Errors
///
/// Returns a validation error when `source` is blank.
pub fn simulate(source: &str) -> Result<String> {
    let source = source.trim();
    if source.is_empty() {
        return Err(Error::validation("Kein Code zum Ausführen vorhanden"));
    }

    let mut output = String::new();
    let mut vars = Variables::default();

    for line in source.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if trimmed.starts_with("print(") {
            if let Some(caps) = PRINT_PATTERN.captures(trimmed) {
                output.push_str(&print_line(&caps[1], &vars));
                output.push('\n');
            }
        }

        if trimmed.contains('=') && !trimmed.contains("==") && !trimmed.contains("!=") {
            let parts: Vec<&str> = trimmed.split('=').collect();
            if let [name, value] = parts.as_slice() {
                vars.set(name.trim(), Value::parse(value.trim()));
            }
        }

        if trimmed.starts_with("for ") && trimmed.contains("range(") {
            if let Some(caps) = RANGE_PATTERN.captures(trimmed) {
                let count = caps[1].parse::<u64>().map_or_else(|_| caps[1].to_string(), |n| n.to_string());
                output.push_str(&format!("# For-Schleife mit {count} Iterationen ausgeführt\n"));
            }
        }

        if trimmed.starts_with("def ") {
            if let Some(caps) = DEF_PATTERN.captures(trimmed) {
                output.push_str(&format!("# Funktion '{}' definiert\n", &caps[1]));
            }
        }
    }

    if output.trim().is_empty() {
        output = NO_OUTPUT.to_string();
    }
    output.push('\n');
    output.push_str(END_MARKER);
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(output: &str) -> &str {
        output.strip_suffix(&format!("\n{END_MARKER}")).unwrap()
    }

    #[test]
    fn test_blank_source_is_rejected() {
        let err = simulate("  \n\t").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_print_literals() {
        let out = simulate("print(\"Hello\")\nprint('World')").unwrap();
        assert_eq!(body(&out), "Hello\nWorld\n");
    }

    #[test]
    fn test_fstring_uses_variables() {
        let out = simulate("name = \"Python\"\nversion = 3.90\nprint(f\"{name} {version}\")").unwrap();
        assert_eq!(body(&out), "Python 3.9\n");
    }

    #[test]
    fn test_bare_name_prints_value_or_itself() {
        let out = simulate("x = 5\nzero = 0\nprint(x)\nprint(zero)\nprint(y)").unwrap();
        assert_eq!(body(&out), "5\nzero\ny\n");
    }

    #[test]
    fn test_loops_and_functions_are_announced() {
        let out = simulate("for i in range(05):\n    pass\ndef greet(name):\n    return name").unwrap();
        assert_eq!(
            body(&out),
            "# For-Schleife mit 5 Iterationen ausgeführt\n# Funktion 'greet' definiert\n"
        );
    }

    #[test]
    fn test_comparisons_are_not_assignments() {
        let out = simulate("a = 1\nif a == 2:\n    pass\nprint(a)").unwrap();
        assert_eq!(body(&out), "1\n");
    }

    #[test]
    fn test_no_output_message() {
        let out = simulate("# only a comment\nx = 1").unwrap();
        assert_eq!(out, format!("{NO_OUTPUT}\n{END_MARKER}"));
    }

    #[test]
    fn test_hello_world_template() {
        let out = simulate(TEMPLATES[0].code).unwrap();
        assert_eq!(body(&out), "Hello World!\nWillkommen beim Script Runner!\n");
    }

    #[test]
    fn test_every_template_runs() {
        for template in TEMPLATES {
            let out = simulate(template.code).unwrap();
            assert!(out.ends_with(END_MARKER), "{}", template.name);
        }
    }
}
