use super::*;

#[test]
fn mapped_chords_with_either_modifier() {
    for chord in [KeyChord::ctrl('s'), KeyChord::meta('s')] {
        assert_eq!(
            dispatch(chord),
            KeyDisposition {
                action: Some(PreviewAction::Export),
                prevent_default: true
            }
        );
    }
    assert_eq!(action_for(KeyChord::ctrl('e')), Some(PreviewAction::Edit));
    assert_eq!(action_for(KeyChord::ctrl('=')), Some(PreviewAction::ZoomIn));
    assert_eq!(action_for(KeyChord::meta('+')), Some(PreviewAction::ZoomIn));
    assert_eq!(action_for(KeyChord::ctrl('-')), Some(PreviewAction::ZoomOut));
}

#[test]
fn unmapped_chords_keep_default_behaviour() {
    for chord in [
        KeyChord::plain('s'),
        KeyChord::plain('-'),
        KeyChord::ctrl('p'),
        KeyChord::ctrl('S'),
    ] {
        let d = dispatch(chord);
        assert_eq!(d.action, None, "{chord:?}");
        assert!(!d.prevent_default, "{chord:?}");
    }
}

#[test]
fn parse_chords() {
    assert_eq!("ctrl+s".parse::<KeyChord>().unwrap(), KeyChord::ctrl('s'));
    assert_eq!("Cmd+=".parse::<KeyChord>().unwrap(), KeyChord::meta('='));
    assert_eq!("ctrl++".parse::<KeyChord>().unwrap(), KeyChord::ctrl('+'));
    assert_eq!("ctrl+-".parse::<KeyChord>().unwrap(), KeyChord::ctrl('-'));
    assert_eq!("+".parse::<KeyChord>().unwrap(), KeyChord::plain('+'));
    assert_eq!("e".parse::<KeyChord>().unwrap(), KeyChord::plain('e'));

    let both = "ctrl+meta+e".parse::<KeyChord>().unwrap();
    assert!(both.ctrl && both.meta);

    assert!("alt+s".parse::<KeyChord>().is_err());
    assert!("ctrl+save".parse::<KeyChord>().is_err());
    assert!("".parse::<KeyChord>().is_err());
}
