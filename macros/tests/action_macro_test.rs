//! Tests for #[derive(Action)] macro

use stockroom_macros::Action;

#[derive(Action, Clone, Debug, PartialEq)]
enum ShelfAction {
    #[command]
    Restock {
        sku: String,
        quantity: u32,
    },

    #[command]
    ClearShelf,

    #[command]
    Rename(String),

    #[event]
    Restocked {
        sku: String,
        quantity: u32,
    },

    #[event]
    LookupFailed(String),

    // Neither command nor event
    Noop,
}

#[test]
fn test_is_command() {
    let action = ShelfAction::Restock {
        sku: "A-1".to_string(),
        quantity: 3,
    };
    assert!(action.is_command());
    assert!(!action.is_event());
    assert!(ShelfAction::ClearShelf.is_command());
    assert!(ShelfAction::Rename("top".to_string()).is_command());
}

#[test]
fn test_is_event() {
    let action = ShelfAction::Restocked {
        sku: "A-1".to_string(),
        quantity: 3,
    };
    assert!(action.is_event());
    assert!(!action.is_command());
    assert!(ShelfAction::LookupFailed("gone".to_string()).is_event());
}

#[test]
fn test_unmarked_variant_is_neither() {
    assert!(!ShelfAction::Noop.is_command());
    assert!(!ShelfAction::Noop.is_event());
}

#[test]
fn test_name_covers_every_shape() {
    assert_eq!(
        ShelfAction::Restock {
            sku: String::new(),
            quantity: 0
        }
        .name(),
        "Restock"
    );
    assert_eq!(ShelfAction::ClearShelf.name(), "ClearShelf");
    assert_eq!(ShelfAction::Rename(String::new()).name(), "Rename");
    assert_eq!(ShelfAction::LookupFailed(String::new()).name(), "LookupFailed");
    assert_eq!(ShelfAction::Noop.name(), "Noop");
}

#[derive(Action, Clone, Copy, Debug)]
enum OnlyCommands {
    #[command]
    Start,
    #[command]
    Stop,
}

#[test]
fn test_enum_with_only_commands() {
    assert!(OnlyCommands::Start.is_command());
    assert!(OnlyCommands::Stop.is_command());
    assert!(!OnlyCommands::Stop.is_event());
}
