//! Usage: Tray menu model (stable item ids + state-dependent labels), independent of the GUI toolkit.

pub(crate) const TRAY_TOOLTIP: &str = "Ticker Widget";

/// A switch the tray can flip and label.
pub(crate) trait Toggleable {
    fn toggle(&mut self) -> Result<(), String>;
    fn is_enabled(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TrayAction {
    ToggleVisibility,
    ChangeTickers,
    ToggleInput,
    ToggleAlwaysOnTop,
    Quit,
}

impl TrayAction {
    pub(crate) const ALL: [TrayAction; 5] = [
        TrayAction::ToggleVisibility,
        TrayAction::ChangeTickers,
        TrayAction::ToggleInput,
        TrayAction::ToggleAlwaysOnTop,
        TrayAction::Quit,
    ];

    pub(crate) fn id(self) -> &'static str {
        match self {
            TrayAction::ToggleVisibility => "tray.visibility",
            TrayAction::ChangeTickers => "tray.change_tickers",
            TrayAction::ToggleInput => "tray.input",
            TrayAction::ToggleAlwaysOnTop => "tray.always_on_top",
            TrayAction::Quit => "tray.quit",
        }
    }

    pub(crate) fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TrayEntry {
    pub action: TrayAction,
    pub label: String,
}

fn visibility_entry(window_visible: bool) -> TrayEntry {
    let label = if window_visible { "Hide App" } else { "Show App" };
    TrayEntry {
        action: TrayAction::ToggleVisibility,
        label: label.to_string(),
    }
}

/// Labels name the action a click performs, so an enabled switch reads "Disable …".
pub(crate) fn toggle_entry(action: TrayAction, noun: &str, toggle: &dyn Toggleable) -> TrayEntry {
    let verb = if toggle.is_enabled() {
        "Disable"
    } else {
        "Enable"
    };
    TrayEntry {
        action,
        label: format!("{verb} {noun}"),
    }
}

pub(crate) fn build_entries(
    window_visible: bool,
    input: TrayEntry,
    always_on_top: TrayEntry,
) -> Vec<TrayEntry> {
    vec![
        visibility_entry(window_visible),
        TrayEntry {
            action: TrayAction::ChangeTickers,
            label: "Change Tickers".to_string(),
        },
        input,
        always_on_top,
        TrayEntry {
            action: TrayAction::Quit,
            label: "Quit".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Switch(bool);

    impl Toggleable for Switch {
        fn toggle(&mut self) -> Result<(), String> {
            self.0 = !self.0;
            Ok(())
        }

        fn is_enabled(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn ids_round_trip_and_are_unique() {
        for action in TrayAction::ALL {
            assert_eq!(TrayAction::from_id(action.id()), Some(action));
        }
        let mut ids: Vec<_> = TrayAction::ALL.iter().map(|a| a.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TrayAction::ALL.len());
        assert_eq!(TrayAction::from_id("tray.unknown"), None);
    }

    #[test]
    fn toggle_labels_follow_state() {
        let mut switch = Switch(true);
        assert_eq!(
            toggle_entry(TrayAction::ToggleInput, "Input", &switch).label,
            "Disable Input"
        );
        switch.toggle().expect("toggle");
        assert_eq!(
            toggle_entry(TrayAction::ToggleInput, "Input", &switch).label,
            "Enable Input"
        );
    }

    #[test]
    fn entries_keep_menu_order() {
        let entries = build_entries(
            false,
            toggle_entry(TrayAction::ToggleInput, "Input", &Switch(false)),
            toggle_entry(TrayAction::ToggleAlwaysOnTop, "Always On Top", &Switch(true)),
        );
        let labels: Vec<_> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(
            labels,
            [
                "Show App",
                "Change Tickers",
                "Enable Input",
                "Disable Always On Top",
                "Quit"
            ]
        );
        let actions: Vec<_> = entries.iter().map(|e| e.action).collect();
        assert_eq!(actions, TrayAction::ALL);
    }
}
