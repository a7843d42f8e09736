/// Predeclared identifiers of the Go universe scope.
///
/// Populated once per [`TypeGraph`] before anything else is added, so the
/// ids handed out here are the same in every graph.
use super::graph::{Symbol, SymbolKind, Type, TypeGraph};

/// Predeclared basic types, in the order they are registered.
const BASIC_TYPES: &[&str] = &[
    "bool",
    "byte",
    "complex64",
    "complex128",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// Predeclared functions.
const BUILTIN_FUNCS: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "imag", "len", "make", "max",
    "min", "new", "panic", "print", "println", "real", "recover",
];

/// Predeclared constants and their untyped kinds.
const CONSTANTS: &[(&str, &str)] = &[
    ("true", "untyped bool"),
    ("false", "untyped bool"),
    ("iota", "untyped int"),
];

pub(super) fn populate(graph: &mut TypeGraph) {
    let universe = graph.universe();

    for &name in BASIC_TYPES {
        let ty = graph.add_type(Type::Basic {
            name: name.to_string(),
        });
        let obj = graph.add_symbol(Symbol::new(name, SymbolKind::TypeName).with_type(ty));
        graph.declare(universe, obj);
    }

    // `error` is a defined interface type without a package.
    let error_obj = graph.add_symbol(Symbol::new("error", SymbolKind::TypeName));
    let placeholder = graph.add_type(Type::Invalid);
    let error = graph.add_type(Type::Named {
        obj: error_obj,
        underlying: placeholder,
        methods: Vec::new(),
    });
    let string = graph.basic("string");
    let error_sig = graph.add_type(Type::Signature {
        recv: Some(error),
        params: Vec::new(),
        results: string.into_iter().collect(),
        variadic: false,
    });
    let error_method = graph.add_symbol(Symbol::new("Error", SymbolKind::Func).with_type(error_sig));
    let error_iface = graph.add_type(Type::Interface {
        methods: vec![error_method],
        embedded: Vec::new(),
    });
    graph.set_underlying(error, error_iface);
    graph.declare(universe, error_obj);
    graph.set_symbol_type(error_obj, error);

    // `any` is an alias for the empty interface; `comparable` is a
    // defined constraint interface.
    let empty = graph.add_type(Type::Interface {
        methods: Vec::new(),
        embedded: Vec::new(),
    });
    let any = graph.add_symbol(Symbol::new("any", SymbolKind::TypeName).with_type(empty));
    graph.declare(universe, any);

    let comparable_obj = graph.add_symbol(Symbol::new("comparable", SymbolKind::TypeName));
    let comparable = graph.add_type(Type::Named {
        obj: comparable_obj,
        underlying: empty,
        methods: Vec::new(),
    });
    graph.declare(universe, comparable_obj);
    graph.set_symbol_type(comparable_obj, comparable);

    for &(name, kind) in CONSTANTS {
        let ty = graph.add_type(Type::Basic {
            name: kind.to_string(),
        });
        let obj = graph.add_symbol(Symbol::new(name, SymbolKind::Const).with_type(ty));
        graph.declare(universe, obj);
    }

    let untyped_nil = graph.add_type(Type::Basic {
        name: "untyped nil".to_string(),
    });
    let nil = graph.add_symbol(Symbol::new("nil", SymbolKind::Nil).with_type(untyped_nil));
    graph.declare(universe, nil);

    for &name in BUILTIN_FUNCS {
        let obj = graph.add_symbol(Symbol::new(name, SymbolKind::Builtin));
        graph.declare(universe, obj);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
