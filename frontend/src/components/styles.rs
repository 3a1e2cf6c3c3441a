use crate::error::PageError;
use crate::host::Host;

/// Shake animation for the rejected search input.
pub const INPUT_ERROR_CSS: &str = r#"
    .input-error { animation: shake 0.6s; }
    @keyframes shake {
        0% { transform: translateX(0); }
        20% { transform: translateX(-6px); }
        40% { transform: translateX(6px); }
        60% { transform: translateX(-4px); }
        80% { transform: translateX(4px); }
        100% { transform: translateX(0); }
    }
"#;

pub fn inject(host: &impl Host) -> Result<(), PageError> {
    host.append_style(INPUT_ERROR_CSS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::search::ERROR_CLASS;
    use crate::host::fake::FakeHost;

    #[test]
    fn stylesheet_targets_search_error_class() {
        let host = FakeHost::new();
        inject(&host).unwrap();
        let styles = host.styles();
        assert_eq!(styles.len(), 1);
        assert!(styles[0].contains(&format!(".{}", ERROR_CLASS)));
    }
}
