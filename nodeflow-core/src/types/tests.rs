#[cfg(test)]
mod tests {
    use crate::*;
    use nodeflow_macros::Action;

    #[derive(Action, Debug, Clone, Copy, PartialEq)]
    enum ReviewAction {
        Approve,
        SendBack,
        #[action(rename = "needs-info")]
        NeedsInfo,
        #[action(default)]
        Skip,
        #[action(terminal)]
        Abort,
    }

    #[test]
    fn test_default_label() {
        assert_eq!(Label::DEFAULT.as_str(), "default");
        assert!(Label::default().is_default());
        assert!(!Label::from("continue").is_default());
        assert_eq!(Label::from(String::from("default")), Label::DEFAULT);
    }

    #[test]
    fn test_builtin_actions() {
        assert_eq!(().label(), Label::DEFAULT);
        assert_eq!(None::<Label>.label(), Label::DEFAULT);
        assert_eq!(Some(Label::from("next")).label(), Label::from("next"));
        assert_eq!(<Option<Label> as Action>::terminal(), Some(Label::DEFAULT));
    }

    #[test]
    fn test_derived_labels() {
        assert_eq!(ReviewAction::Approve.label().as_str(), "approve");
        assert_eq!(ReviewAction::SendBack.label().as_str(), "send_back");
        assert_eq!(ReviewAction::NeedsInfo.label().as_str(), "needs-info");
        assert!(ReviewAction::Skip.label().is_default());
        assert_eq!(ReviewAction::terminal(), ReviewAction::Abort);
        assert_eq!(ReviewAction::Abort.label().as_str(), "abort");
    }

    #[test]
    fn test_error_display() {
        let err = NodeError::Execution("boom".into());
        assert_eq!(err.to_string(), "Execution: boom");

        let graph_err: GraphError = err.clone().into();
        assert_eq!(graph_err.to_string(), "Execution: boom");

        let io_err: NodeError = std::io::Error::new(std::io::ErrorKind::Other, "closed").into();
        assert!(matches!(io_err, NodeError::Io(msg) if msg == "closed"));
    }

    #[test]
    fn test_error_serialization() {
        let err = NodeError::Timeout("slow".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "Timeout", "message": "slow" }));
    }
}
