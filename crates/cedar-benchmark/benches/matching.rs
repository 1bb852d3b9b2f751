use std::hint::black_box;

use cedar_ast::{Ast, AstFactory, AstKind, TokenType, WILDCARD};
use codspeed_criterion_compat::{BenchmarkId, Criterion, criterion_group, criterion_main};

const ADD: TokenType = TokenType::new(4);
const NUM: TokenType = TokenType::new(5);

/// Left-leaning `((1 + 2) + 3) + ...` with `len` operands.
fn sum(factory: &AstFactory, len: usize) -> Ast {
    let mut tree = factory.create_with(NUM, "0");
    for i in 1..len {
        let add = factory.create_with(ADD, "+");
        add.add_child(tree);
        add.add_child(factory.create_with(NUM, i.to_string()));
        tree = add;
    }
    tree
}

/// Balanced binary tree of `+` nodes with `depth` levels.
fn balanced(factory: &AstFactory, depth: u32) -> Ast {
    let root = factory.create_with(ADD, "+");
    if depth > 0 {
        root.add_child(balanced(factory, depth - 1));
        root.add_child(balanced(factory, depth - 1));
    } else {
        root.set_type(NUM);
        root.set_text("1");
    }
    root
}

fn benchmark_matching(c: &mut Criterion) {
    let factory = AstFactory::new(AstKind::Common);
    let trees = [("sum_1000", sum(&factory, 1000)), ("balanced_12", balanced(&factory, 12))];

    let exact = factory.create_with(NUM, "1");
    let partial = AstFactory::make(&[
        Some(factory.create_with(ADD, "+")),
        Some(factory.create_with(WILDCARD, "*")),
        Some(factory.create_with(NUM, "1")),
    ])
    .expect("pattern has a root");

    let mut group = c.benchmark_group("Matching Benchmark");

    for (name, tree) in &trees {
        let copy = tree.dup_tree();
        group.bench_with_input(BenchmarkId::new("equals_tree", name), tree, |b, tree| {
            b.iter(|| black_box(tree.equals_tree(&copy)));
        });
        group.bench_with_input(BenchmarkId::new("find_all", name), tree, |b, tree| {
            b.iter(|| black_box(tree.find_all(&exact)));
        });
        group.bench_with_input(BenchmarkId::new("find_all_partial", name), tree, |b, tree| {
            b.iter(|| black_box(tree.find_all_partial(&partial)));
        });
        group.bench_with_input(BenchmarkId::new("to_string_tree", name), tree, |b, tree| {
            b.iter(|| black_box(tree.to_string_tree()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_matching);
criterion_main!(benches);
