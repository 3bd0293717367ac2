use std::io::Cursor;
use std::sync::Arc;

use drill_core::model::{
    Article, Catalog, CatalogDraft, ComprehensionLevel, GrammarLevel, LevelIndex, ProgressState,
    Question, ReviewContribution, Track, VocabEntry, VocabLevel,
};
use drill_core::time::fixed_today;
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{Clock, DrillService};
use storage::repository::InMemoryRepository;
use ui::{Console, run_app};

fn catalog() -> Arc<Catalog> {
    let entries = [
        VocabEntry::new("Haus", "Häuser", Article::Das, "casa"),
        VocabEntry::new("Tisch", "Tische", Article::Der, "tavolo"),
        VocabEntry::new("Tür", "Türen", Article::Die, "porta"),
    ];
    Arc::new(
        CatalogDraft {
            vocabulary: vec![VocabLevel {
                name: "Vocabolario generale 01".into(),
                items: entries.to_vec(),
            }],
            grammar: vec![grammar_level()],
            comprehension: vec![ComprehensionLevel {
                name: "Comprensione 01 – Nel magazzino".into(),
                passage: "Tom arbeitet in einem Lager.".into(),
                questions: vec![Question {
                    question: "Wo arbeitet Tom?".into(),
                    options: vec!["Im Lager".into(), "Im Büro".into()],
                    correct_index: 0,
                }],
            }],
        }
        .validate()
        .unwrap(),
    )
}

fn grammar_level() -> GrammarLevel {
    GrammarLevel {
        name: "Grammatica 01 – Articoli determinativi".into(),
        explanation: "Der, die, das: maschile, femminile, neutro.".into(),
        questions: vec![Question {
            question: "Quale articolo è femminile?".into(),
            options: vec!["der".into(), "die".into(), "das".into()],
            correct_index: 1,
        }],
    }
}

fn run(input: &str, repo: &InMemoryRepository) -> (String, DrillService) {
    let mut drill = DrillService::new(catalog(), Arc::new(repo.clone()), Clock::fixed(fixed_today()));
    let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    let mut rng = StdRng::seed_from_u64(7);

    run_app(&mut console, &mut drill, &mut rng).unwrap();

    let output = String::from_utf8(console.into_output()).unwrap();
    (output, drill)
}

#[test]
fn exit_from_menu_says_goodbye() {
    let repo = InMemoryRepository::new();
    let (out, _) = run("5\n", &repo);

    assert!(out.starts_with("✨ Benvenuto in Deutschland B2! ✨"));
    assert!(out.contains("1. Percorso Vocabolario (0/1)"));
    assert!(out.contains("4. Ripasso quotidiano"));
    assert!(out.trim_end().ends_with("Auf Wiedersehen! Buono studio 👋"));
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn end_of_input_exits_cleanly() {
    let repo = InMemoryRepository::new();
    let (out, _) = run("", &repo);
    assert!(out.contains("Auf Wiedersehen!"));
}

#[test]
fn invalid_menu_input_reprompts() {
    let repo = InMemoryRepository::new();
    let (out, _) = run("x\n9\n\n5\n", &repo);
    assert_eq!(out.matches("Scelta non valida. Riprova.").count(), 3);
}

#[test]
fn passing_a_grammar_level_is_persisted() {
    let repo = InMemoryRepository::new();
    let (out, drill) = run("2\n1\n\n2\n5\n", &repo);

    assert!(out.contains("Inizio Grammatica 01 – Articoli determinativi"));
    assert!(out.contains("Regola:"));
    assert!(out.contains("✅ Corretto!"));
    assert!(out.contains("Hai superato il livello! Punteggio 1/1"));
    assert!(out.contains("2. Percorso Grammatica (1/1)"));

    let saved = repo.snapshot().unwrap().unwrap();
    assert!(saved.is_completed(Track::Grammar, LevelIndex::new(0)));
    assert_eq!(saved.review_grammar.len(), 1);
    assert_eq!(&saved, drill.state());
}

#[test]
fn failing_a_level_shows_the_right_answer_and_records_nothing() {
    let repo = InMemoryRepository::new();
    let (out, _) = run("3\n1\n\n2\n5\n", &repo);

    assert!(out.contains("Testo:"));
    assert!(out.contains("❌ Sbagliato! La risposta corretta è: Im Lager"));
    assert!(out.contains("Non hai raggiunto il punteggio sufficiente (0/1)."));
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn picker_marks_completed_levels_and_goes_back() {
    let mut state = ProgressState::new();
    state.mark_completed(
        LevelIndex::new(0),
        ReviewContribution::Grammar(grammar_level()),
    );
    let repo = InMemoryRepository::with_state(state);
    let (out, _) = run("2\nb\n5\n", &repo);

    assert!(out.contains("01. Grammatica 01 – Articoli determinativi ✅"));
    assert!(out.contains("Scegli un livello (1-1) o 'b' per tornare indietro: "));
    assert_eq!(out.matches("Menù principale:").count(), 2);
}

#[test]
fn vocabulary_intro_lists_entries_and_leaving_records_nothing() {
    let repo = InMemoryRepository::new();
    let (out, drill) = run("1\n1\n", &repo);

    assert!(out.contains(" - das Haus | plurale: Häuser | traduzione: casa"));
    assert!(out.contains(" - der Tisch | plurale: Tische | traduzione: tavolo"));
    assert!(out.contains("Premi Invio per iniziare gli esercizi..."));
    assert!(!drill.state().is_completed(Track::Vocabulary, LevelIndex::new(0)));
    assert_eq!(repo.save_count(), 0);
}

#[test]
fn review_refusals_have_distinct_messages() {
    let repo = InMemoryRepository::new();
    let (out, _) = run("4\n5\n", &repo);
    assert!(out.contains("Non ci sono ancora elementi da ripassare."));

    let mut state = ProgressState::new();
    state.mark_completed(
        LevelIndex::new(0),
        ReviewContribution::Grammar(grammar_level()),
    );
    state.last_review = Some(fixed_today());
    let repo = InMemoryRepository::with_state(state);
    let (out, _) = run("4\n5\n", &repo);
    assert!(out.contains("Hai già effettuato il ripasso oggi. Riprova domani."));
}

#[test]
fn daily_review_commits_even_when_every_answer_is_wrong() {
    let mut state = ProgressState::new();
    state.mark_completed(
        LevelIndex::new(0),
        ReviewContribution::Grammar(grammar_level()),
    );
    let repo = InMemoryRepository::with_state(state);
    let (out, drill) = run("4\n1\n4\n5\n", &repo);

    assert!(out.contains("Sessione di ripasso quotidiano"));
    assert!(out.contains("❌ Sbagliato! La risposta corretta è: die"));
    assert!(out.contains("Risposte corrette: 0/1"));
    assert!(out.contains("Ripasso completato! Continua così 🎉"));
    assert!(out.contains("Hai già effettuato il ripasso oggi."));
    assert_eq!(drill.state().last_review, Some(fixed_today()));
    assert_eq!(repo.snapshot().unwrap().unwrap().last_review, Some(fixed_today()));
}
