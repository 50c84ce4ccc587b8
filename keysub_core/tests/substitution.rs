use std::cell::RefCell;

use keysub_core::{
    Decision, DocumentHandle, DocumentRef, DocumentUnavailable, KeyEvent, KeyInterceptor,
    KeyLogger, RuleSet, Session, TextDocument,
};

#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<String>>,
}

impl DocumentHandle for Recorder {
    fn insert_text(&self, text: &str) -> Result<(), DocumentUnavailable> {
        self.calls.borrow_mut().push(text.to_owned());
        Ok(())
    }
}

fn and_rules() -> RuleSet {
    RuleSet::from_pairs([("&", "and")]).unwrap()
}

#[test]
fn ampersand_becomes_and() {
    let doc = Recorder::default();
    let interceptor = KeyInterceptor::new(and_rules(), &doc).unwrap();
    let mut ev = KeyEvent::new("&", true);
    assert_eq!(
        interceptor.handle(&mut ev).unwrap(),
        Decision::Intercepted("and".into())
    );
    assert_eq!(*doc.calls.borrow(), ["and"]);
}

#[test]
fn other_keys_are_left_alone() {
    let doc = Recorder::default();
    let interceptor = KeyInterceptor::new(and_rules(), &doc).unwrap();
    let mut ev = KeyEvent::new("b", true);
    assert_eq!(interceptor.handle(&mut ev).unwrap(), Decision::PassThrough);
    assert!(doc.calls.borrow().is_empty());
}

#[test]
fn empty_rules_pass_everything_through() {
    let doc = Recorder::default();
    let interceptor = KeyInterceptor::new(RuleSet::new(), &doc).unwrap();
    for key in ["&", "b", "Enter", " "] {
        for preventable in [true, false] {
            let mut ev = KeyEvent::new(key, preventable);
            assert_eq!(interceptor.handle(&mut ev).unwrap(), Decision::PassThrough);
            assert!(!ev.default_prevented());
        }
    }
    assert!(doc.calls.borrow().is_empty());
}

#[test]
fn unpreventable_match_is_ignored() {
    let doc = Recorder::default();
    let interceptor = KeyInterceptor::new(and_rules(), &doc).unwrap();
    let mut ev = KeyEvent::new("&", false);
    assert_eq!(interceptor.handle(&mut ev).unwrap(), Decision::Ignored);
    assert!(doc.calls.borrow().is_empty());
}

#[test]
fn identical_events_give_identical_outcomes() {
    let doc = Recorder::default();
    let rules = RuleSet::from_pairs([("&", "and"), ("->", "→")]).unwrap();
    let interceptor = KeyInterceptor::new(rules, &doc).unwrap();

    for key in ["&", "->", "x"] {
        let mut a = KeyEvent::preventable(key);
        let mut b = KeyEvent::preventable(key);
        let first = interceptor.handle(&mut a).unwrap();
        let second = interceptor.handle(&mut b).unwrap();
        assert_eq!(first, second);
        assert_eq!(a, b);
    }
    assert_eq!(*doc.calls.borrow(), ["and", "and", "→", "→"]);
}

#[test]
fn dropped_document_surfaces_as_unavailable() {
    let shared = TextDocument::with_text("A line of text in a paragraph.").shared();
    let interceptor = KeyInterceptor::new(and_rules(), DocumentRef::new(&shared)).unwrap();
    drop(shared);

    let mut ev = KeyEvent::preventable("&");
    assert!(interceptor.handle(&mut ev).is_err());
    assert!(ev.default_prevented());

    // 未命中的按键不触碰文档，仍然正常放行
    let mut ev = KeyEvent::preventable("b");
    assert_eq!(interceptor.handle(&mut ev).unwrap(), Decision::PassThrough);
}

#[test]
fn session_with_logger_still_substitutes() {
    let shared = TextDocument::with_text("Tom ").shared();
    let interceptor = KeyInterceptor::new(and_rules(), DocumentRef::new(&shared)).unwrap();
    let session = Session::new()
        .with_processor(KeyLogger)
        .with_processor(interceptor);

    for ch in "& Jerry".chars() {
        let mut ev = KeyEvent::from_char(ch);
        session.handle(&mut ev).unwrap();
        if !ev.default_prevented() {
            shared.borrow_mut().insert_text(&ev.key);
        }
    }
    assert_eq!(shared.borrow().text(), "Tom and Jerry");
}
