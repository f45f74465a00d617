use ward_record::{validate_priority, PatientId, PatientRecord};
use ward_registry::Registry;
use ward_sort::SortKey;

use crate::render::{self, OutputMode};

const HELP: &[&str] = &[
    "commands:",
    "  admit id|name|age|condition|priority|date|physician",
    "  search <id>            discharge <id>",
    "  list                   priority",
    "  age <min> <max>        condition <text>",
    "  sort <priority|date>   tree",
    "  stats                  history",
    "  help                   quit",
];

/// Line-oriented menu over a [`Registry`]. Each input line yields the lines
/// to print and whether the session should end.
#[derive(Debug)]
pub struct MenuSession {
    registry: Registry,
    mode: OutputMode,
}

fn parse_id(arg: &str) -> Result<PatientId, String> {
    arg.trim()
        .parse::<PatientId>()
        .map_err(|_| format!("error: '{}' is not a patient id", arg.trim()))
}

fn parse_admission(args: &str) -> Result<PatientRecord, String> {
    let fields: Vec<&str> = args.split('|').map(str::trim).collect();
    let [id, name, age, condition, priority, date, physician] = fields[..] else {
        return Err(format!(
            "error: admit expects 7 '|'-separated fields, got {}",
            fields.len()
        ));
    };
    let id = parse_id(id)?;
    let age = age
        .parse::<u32>()
        .map_err(|_| format!("error: '{age}' is not a valid age"))?;
    let priority = priority
        .parse::<i64>()
        .map_err(|_| format!("error: '{priority}' is not a priority number"))
        .and_then(|n| validate_priority(n).map_err(|e| format!("error: {e}")))?;
    Ok(PatientRecord::new(id, name, age, condition, priority, date, physician))
}

impl MenuSession {
    pub fn new(registry: Registry, mode: OutputMode) -> Self {
        Self { registry, mode }
    }

    pub fn prompt(&self) -> &'static str {
        "ward> "
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn handle_line(&mut self, line: &str) -> (Vec<String>, bool) {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return (Vec::new(), false);
        }
        let (cmd, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (trimmed, ""),
        };

        let out = match cmd.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => return (vec!["Goodbye!".to_string()], true),
            "help" | "?" => HELP.iter().map(|s| s.to_string()).collect(),
            "admit" => self.admit(rest),
            "search" => self.search(rest),
            "discharge" => self.discharge(rest),
            "list" => render::patient_list(&self.registry.patients(), self.mode),
            "priority" => render::priority_groups(&self.registry, self.mode),
            "age" => self.age_range(rest),
            "condition" => {
                if rest.is_empty() {
                    vec!["error: usage: condition <text>".to_string()]
                } else {
                    render::patient_list(&self.registry.by_condition(rest), self.mode)
                }
            }
            "sort" => match rest.parse::<SortKey>() {
                Ok(key) => render::patient_list(&self.registry.sorted(key), self.mode),
                Err(e) => vec![format!("error: {e}")],
            },
            "tree" => render::trees(&self.registry, self.mode),
            "stats" => render::statistics(&self.registry.statistics(), self.mode),
            "history" => render::history(self.registry.history(), self.mode),
            _ => vec![format!("error: unknown command '{trimmed}' (try 'help')")],
        };
        (out, false)
    }

    fn admit(&mut self, rest: &str) -> Vec<String> {
        let record = match parse_admission(rest) {
            Ok(r) => r,
            Err(e) => return vec![e],
        };
        let id = record.id();
        match self.registry.admit(record) {
            Ok(()) => vec![format!("Patient {id} admitted")],
            Err(e) => vec![format!("error: {e}")],
        }
    }

    fn search(&self, rest: &str) -> Vec<String> {
        let id = match parse_id(rest) {
            Ok(id) => id,
            Err(e) => return vec![e],
        };
        match self.registry.search(id) {
            Some(p) => render::patient(p, self.mode),
            None => vec![format!("Patient {id} not found!")],
        }
    }

    fn discharge(&mut self, rest: &str) -> Vec<String> {
        let id = match parse_id(rest) {
            Ok(id) => id,
            Err(e) => return vec![e],
        };
        match self.registry.discharge(id) {
            Ok(p) => {
                let mut out = vec![format!("Patient {id} discharged")];
                out.extend(render::patient(&p, self.mode));
                out
            }
            Err(e) => vec![format!("error: {e}")],
        }
    }

    fn age_range(&self, rest: &str) -> Vec<String> {
        let bounds: Vec<Result<u32, _>> = rest.split_whitespace().map(str::parse::<u32>).collect();
        match bounds[..] {
            [Ok(min), Ok(max)] => {
                render::patient_list(&self.registry.by_age_range(min, max), self.mode)
            }
            _ => vec!["error: usage: age <min> <max>".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> MenuSession {
        MenuSession::new(Registry::with_sample_data(), OutputMode::Text)
    }

    #[test]
    fn help_lists_commands() {
        let mut s = session();
        let (out, exit) = s.handle_line("help");
        assert!(!exit);
        assert!(out.iter().any(|l| l.contains("admit")));
    }

    #[test]
    fn quit_ends_the_session() {
        let mut s = session();
        let (_out, exit) = s.handle_line("quit");
        assert!(exit);
        let (_out, exit) = s.handle_line("  Q  ");
        assert!(exit);
    }

    #[test]
    fn blank_lines_do_nothing() {
        let mut s = session();
        assert_eq!(s.handle_line("   "), (Vec::new(), false));
    }

    #[test]
    fn admit_then_search() {
        let mut s = session();
        let (out, _) =
            s.handle_line("admit 106 | Dana White | 40 | Asthma | 2 | 2024-01-19 | Dr. Lee");
        assert_eq!(out, vec!["Patient 106 admitted"]);
        let (out, _) = s.handle_line("search 106");
        assert_eq!(out.len(), 1);
        assert!(out[0].starts_with("ID: 106, Name: Dana White"));
        assert_eq!(s.registry().len(), 6);
        assert!(s.registry().indices_in_sync());
    }

    #[test]
    fn malformed_admissions_are_reported() {
        let mut s = session();
        let (out, exit) = s.handle_line("admit 106|Dana|40|Asthma|2|2024-01-19");
        assert!(!exit);
        assert!(out[0].contains("7 '|'-separated fields"));

        let (out, _) = s.handle_line("admit 106|Dana|forty|Asthma|2|2024-01-19|Dr. Lee");
        assert!(out[0].contains("not a valid age"));

        let (out, _) = s.handle_line("admit 106|Dana|40|Asthma|4|2024-01-19|Dr. Lee");
        assert!(out[0].contains("priority must be"));

        let (out, _) = s.handle_line("admit 106|Dana|40|Asthma|2|19/01/2024|Dr. Lee");
        assert!(out[0].contains("admission date"));

        let (out, _) = s.handle_line("admit 101|Dana|40|Asthma|2|2024-01-19|Dr. Lee");
        assert!(out[0].contains("101"));
        assert_eq!(s.registry().len(), 5);
    }

    #[test]
    fn discharge_moves_patient_to_history() {
        let mut s = session();
        let (out, _) = s.handle_line("discharge 103");
        assert_eq!(out[0], "Patient 103 discharged");
        assert!(out[1].ends_with("[DELETED]"));

        let (out, _) = s.handle_line("search 103");
        assert_eq!(out, vec!["Patient 103 not found!"]);

        let (out, _) = s.handle_line("history");
        assert!(out.iter().any(|l| l.contains("Bob Wilson")));
        assert_eq!(out.last().map(String::as_str), Some("Total: 1 patients"));

        let (out, _) = s.handle_line("discharge 103");
        assert!(out[0].starts_with("error:"));
    }

    #[test]
    fn queries_and_sorting() {
        let mut s = session();
        let (out, _) = s.handle_line("age 40 60");
        assert_eq!(out.len(), 3);
        let (out, _) = s.handle_line("condition Stroke");
        assert!(out[0].starts_with("ID: 105"));
        let (out, _) = s.handle_line("sort date");
        assert!(out[0].starts_with("ID: 103"));
        let (out, _) = s.handle_line("sort sideways");
        assert!(out[0].contains("unknown sort key"));
        let (out, _) = s.handle_line("age 60");
        assert_eq!(out, vec!["error: usage: age <min> <max>"]);
    }

    #[test]
    fn tree_and_stats_render() {
        let mut s = session();
        let (out, _) = s.handle_line("tree");
        assert!(out.contains(&"Level 0: 102(A) ".to_string()));
        let (out, _) = s.handle_line("stats");
        assert!(out.contains(&"Total Patients: 5".to_string()));
        assert!(out.contains(&"Average Priority: 1.80".to_string()));
    }

    #[test]
    fn unknown_commands_are_rejected() {
        let mut s = session();
        let (out, exit) = s.handle_line("frobnicate");
        assert!(!exit);
        assert!(out[0].starts_with("error: unknown command"));
        let (out, _) = s.handle_line("search abc");
        assert_eq!(out, vec!["error: 'abc' is not a patient id"]);
    }
}
