use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dfa_grader::boundary::{AutomatonSpec, TransitionSpec};
use dfa_grader::cancel::CancellationToken;
use dfa_grader::config::Config;
use dfa_grader::dfa::Dfa;
use dfa_grader::grader::grade;

/// A DFA over `{0,1}` recognizing "divisible by `modulus`, read as binary, MSB first",
/// with one unreachable decoy state thrown in so `minimize` has real work to do.
fn divisible_by(modulus: usize) -> Dfa {
    let mut dfa = Dfa::new();
    dfa.add_letter("0").unwrap();
    dfa.add_letter("1").unwrap();
    for r in 0..modulus {
        dfa.add_state(&format!("r{r}")).unwrap();
    }
    dfa.add_state("decoy").unwrap();
    dfa.set_start("r0").unwrap();
    dfa.set_finals(["r0"]).unwrap();
    for r in 0..modulus {
        let via_0 = (r * 2) % modulus;
        let via_1 = (r * 2 + 1) % modulus;
        dfa.set_transition(&format!("r{r}"), "0", &format!("r{via_0}")).unwrap();
        dfa.set_transition(&format!("r{r}"), "1", &format!("r{via_1}")).unwrap();
    }
    dfa.set_transition("decoy", "0", "decoy").unwrap();
    dfa.set_transition("decoy", "1", "decoy").unwrap();
    dfa
}

fn totalize_and_minimize(c: &mut Criterion) {
    c.bench_function("totalize", |b| {
        b.iter(|| {
            let mut dfa = black_box(divisible_by(16));
            dfa.totalize();
            dfa
        })
    });

    c.bench_function("minimize", |b| {
        b.iter(|| {
            let mut dfa = black_box(divisible_by(16));
            dfa.totalize();
            dfa.minimize();
            dfa
        })
    });
}

fn equivalence_check(c: &mut Criterion) {
    let mut a = divisible_by(16);
    a.totalize();
    a.minimize();
    let mut b_dfa = divisible_by(16);
    b_dfa.totalize();
    b_dfa.minimize();

    c.bench_function("equiv", |b| b.iter(|| a.equiv(black_box(&b_dfa))));
}

fn automaton_spec(modulus: usize) -> AutomatonSpec {
    let mut transitions = Vec::with_capacity(modulus * 2);
    for r in 0..modulus {
        transitions.push(TransitionSpec {
            from: format!("r{r}"),
            to: format!("r{}", (r * 2) % modulus),
            symbol: "0".to_string(),
        });
        transitions.push(TransitionSpec {
            from: format!("r{r}"),
            to: format!("r{}", (r * 2 + 1) % modulus),
            symbol: "1".to_string(),
        });
    }
    AutomatonSpec {
        alphabet: vec!["0".to_string(), "1".to_string()],
        states: (0..modulus).map(|r| format!("r{r}")).collect(),
        start_state: "r0".to_string(),
        final_states: vec!["r0".to_string()],
        transitions,
    }
}

fn full_grade(c: &mut Criterion) {
    let attempt = automaton_spec(16);
    let mut target = automaton_spec(16);
    target.final_states = vec!["r1".to_string()];
    let config = Config::default();

    c.bench_function("grade (different automata)", |b| {
        b.iter(|| grade(black_box(&attempt), black_box(&target), &config, &CancellationToken::new()))
    });

    c.bench_function("grade (identical automata)", |b| {
        b.iter(|| grade(black_box(&attempt), black_box(&attempt), &config, &CancellationToken::new()))
    });
}

criterion_group!(benches, totalize_and_minimize, equivalence_check, full_grade);
criterion_main!(benches);
