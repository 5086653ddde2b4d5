use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Tma,
    Dlis,
    Tprd,
}

impl Board {
    pub const ALL: [Board; 3] = [Board::Tma, Board::Dlis, Board::Tprd];

    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Tma => "TMA",
            Board::Dlis => "DLIS",
            Board::Tprd => "TPRD",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|board| board.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueType {
    Bug,
    Story,
}

impl IssueType {
    pub const ALL: [IssueType; 2] = [IssueType::Bug, IssueType::Story];

    pub fn as_str(&self) -> &'static str {
        match self {
            IssueType::Bug => "Bug",
            IssueType::Story => "Story",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|issue_type| issue_type.as_str().eq_ignore_ascii_case(value))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    PythonBackend,
    Backend,
    Server,
    Client,
    Platforms,
    Caching,
    TritonCli,
    GitHub,
}

impl Component {
    pub const ALL: [Component; 8] = [
        Component::PythonBackend,
        Component::Backend,
        Component::Server,
        Component::Client,
        Component::Platforms,
        Component::Caching,
        Component::TritonCli,
        Component::GitHub,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Component::PythonBackend => "Python Backend",
            Component::Backend => "Backend",
            Component::Server => "Server",
            Component::Client => "Client",
            Component::Platforms => "Platforms",
            Component::Caching => "Caching",
            Component::TritonCli => "Triton CLI",
            Component::GitHub => "GitHub",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|component| component.as_str().eq_ignore_ascii_case(value))
    }
}

/// Field set submitted to the tracker. Only constructed through [`TicketSpec::build`],
/// so every value is inside its vocabulary and the summary is non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketSpec {
    pub board: Board,
    pub summary: String,
    pub description: String,
    pub issue_type: IssueType,
    pub components: Vec<Component>,
}

impl TicketSpec {
    pub fn build(
        summary: &str,
        description: String,
        board: &str,
        issue_type: &str,
        components: &[String],
    ) -> AppResult<Self> {
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(AppError::Validation(
                "ticket summary must not be empty".to_string(),
            ));
        }

        let board = Board::from_str(board).ok_or_else(|| AppError::InvalidField {
            field: "board",
            value: board.to_string(),
        })?;
        let issue_type = IssueType::from_str(issue_type).ok_or_else(|| AppError::InvalidField {
            field: "issue type",
            value: issue_type.to_string(),
        })?;

        let mut parsed = Vec::with_capacity(components.len());
        for raw in components {
            let component = Component::from_str(raw).ok_or_else(|| AppError::InvalidField {
                field: "component",
                value: raw.clone(),
            })?;
            if !parsed.contains(&component) {
                parsed.push(component);
            }
        }

        Ok(Self {
            board,
            summary: summary.to_string(),
            description,
            issue_type,
            components: parsed,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketResult {
    pub key: String,
    pub browse_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn components(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn builds_spec_from_known_values() {
        let spec = TicketSpec::build(
            "  Fix race in X ",
            "body".to_string(),
            "DLIS",
            "Bug",
            &components(&["Server", "GitHub"]),
        )
        .unwrap();

        assert_eq!(spec.summary, "Fix race in X");
        assert_eq!(spec.board, Board::Dlis);
        assert_eq!(spec.issue_type, IssueType::Bug);
        assert_eq!(spec.components, vec![Component::Server, Component::GitHub]);
    }

    #[test]
    fn collapses_duplicate_components() {
        let spec = TicketSpec::build(
            "title",
            String::new(),
            "TMA",
            "Story",
            &components(&["GitHub", "Caching", "GitHub"]),
        )
        .unwrap();
        assert_eq!(spec.components, vec![Component::GitHub, Component::Caching]);
    }

    #[test]
    fn rejects_empty_summary() {
        let err = TicketSpec::build("   ", String::new(), "DLIS", "Bug", &[]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_board() {
        let err = TicketSpec::build("title", String::new(), "NOPE", "Bug", &[]).unwrap_err();
        assert!(matches!(err, AppError::InvalidField { field: "board", .. }));
    }

    #[test]
    fn rejects_unknown_issue_type() {
        let err = TicketSpec::build("title", String::new(), "DLIS", "Epic", &[]).unwrap_err();
        assert!(matches!(
            err,
            AppError::InvalidField {
                field: "issue type",
                ..
            }
        ));
    }

    #[test]
    fn rejects_unknown_component() {
        let err = TicketSpec::build(
            "title",
            String::new(),
            "DLIS",
            "Bug",
            &components(&["Server", "Frontend"]),
        )
        .unwrap_err();
        match err {
            AppError::InvalidField { field, value } => {
                assert_eq!(field, "component");
                assert_eq!(value, "Frontend");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parses_vocabulary_case_insensitively() {
        assert_eq!(Board::from_str("tprd"), Some(Board::Tprd));
        assert_eq!(IssueType::from_str("story"), Some(IssueType::Story));
        assert_eq!(
            Component::from_str("triton cli"),
            Some(Component::TritonCli)
        );
        assert_eq!(Component::from_str("unknown"), None);
    }
}
