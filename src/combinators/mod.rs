/*!
 * The standard combinator set. Built-ins are ordinary table entries; callers
 * may extend or replace any of them per invocation through
 * [`CombinatorTable::with`] or a table built from [`install`].
 */

mod collect;
mod core;
mod repeat;
mod types;

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::engine::matcher::guard_def;
use crate::engine::table::{Behavior, CombinatorDef, CombinatorTable, DispatchKey, Param};
use crate::value::TypeTag;

static STANDARD: Lazy<CombinatorTable> = Lazy::new(standard);

/// The process-wide default table, used when an invocation supplies none.
pub fn standard_table() -> &'static CombinatorTable {
    &STANDARD
}

/// A fresh copy of the standard table, for callers who want to extend it.
pub fn standard() -> CombinatorTable {
    let mut table = CombinatorTable::new();
    install(&mut table);
    table
}

fn def(name: &str, params: Vec<Param>, behavior: Behavior) -> CombinatorDef {
    CombinatorDef::new(name, params, behavior)
}

/// Register the standard combinators into `table`.
pub fn install(table: &mut CombinatorTable) {
    use DispatchKey::Type;

    let word = DispatchKey::word;
    let sub = Param::sub_rule;

    let any = Arc::new(def("<any>", vec![], Arc::new(core::any_rule)));
    table.register_shared(word("<any>"), any.clone());
    table.register_shared(word("skip"), any);

    table.register(word("<end>"), def("<end>", vec![], Arc::new(core::end_rule)));
    table.register(
        word("opt"),
        def("opt", vec![sub("rule")], Arc::new(core::opt_rule)),
    );
    table.register(
        word("not"),
        def("not", vec![sub("rule")], Arc::new(core::not_rule)),
    );
    table.register(
        word("ahead"),
        def("ahead", vec![sub("rule")], Arc::new(core::ahead_rule)),
    );
    table.register(
        word("quote"),
        def(
            "quote",
            vec![Param::quoted("element")],
            Arc::new(core::quote_rule),
        ),
    );
    table.register(
        word("comment"),
        def(
            "comment",
            vec![Param::quoted_endable("note")],
            Arc::new(core::comment_rule),
        ),
    );
    table.register(
        word("elide"),
        def("elide", vec![sub("rule")], Arc::new(core::elide_rule)),
    );

    table.register(
        word("some"),
        def("some", vec![sub("rule")], Arc::new(repeat::some_rule)),
    );
    table.register(
        word("repeat"),
        def(
            "repeat",
            vec![
                Param::quoted_as("count", [TypeTag::Int]),
                Param::quoted_if("limit", [TypeTag::Int]),
                sub("rule"),
            ],
            Arc::new(repeat::repeat_rule),
        ),
    );
    table.register_shared(word("further"), guard_def());
    table.register(
        word("break"),
        def("break", vec![], Arc::new(repeat::break_rule)),
    );

    table.register(
        word("collect"),
        def("collect", vec![sub("rule")], Arc::new(collect::collect_rule)),
    );
    table.register(
        word("keep"),
        def("keep", vec![sub("rule")], Arc::new(collect::keep_rule)),
    );

    table.register(
        Type(TypeTag::Block),
        def(
            "block",
            vec![Param::alternatives("rules")],
            Arc::new(types::block_rule),
        ),
    );
    table.register(
        Type(TypeTag::Group),
        def("group", vec![Param::value("value")], Arc::new(types::group_rule)),
    );
    table.register(
        Type(TypeTag::Text),
        def("text", vec![Param::value("value")], Arc::new(types::text_rule)),
    );
    table.register(
        Type(TypeTag::Char),
        def("char", vec![Param::value("value")], Arc::new(types::char_rule)),
    );
    table.register(
        Type(TypeTag::Logic),
        def("logic", vec![Param::value("value")], Arc::new(types::logic_rule)),
    );
    table.register(
        Type(TypeTag::Word),
        def(
            "word",
            vec![Param::value("value")],
            Arc::new(types::resolved_word_rule),
        ),
    );
    table.register(
        Type(TypeTag::Func),
        def(
            "function",
            vec![Param::value("value")],
            Arc::new(types::apply_rule),
        ),
    );
}
