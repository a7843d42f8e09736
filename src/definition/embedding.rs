/// Embedding-chain walk.
///
/// A selection `x.f` records the path of embedded fields the front end
/// followed from the type of `x` to the member `f`.  The apparent receiver
/// is therefore not necessarily the type that declares `f`: in
///
/// ```go
/// type L interface{ M() }
/// type I interface{ L }
/// type P struct{ I }
/// type T struct{ *P }
/// ```
///
/// `(&T{}).M` is declared by `L`.  [`declaring_type`] replays the index
/// path hop by hop over the type graph to find it.
use tracing::debug;

use crate::binding::{Selection, SelectionKind, SymbolId, Type, TypeGraph, TypeId};
use crate::types::NotFound;

/// Pointer/named indirections followed within a single hop before giving
/// up on a malformed graph.
const MAX_HOP_DEPTH: usize = 16;

/// The type that declares a selected member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaringType {
    /// The defined type, pointers stripped.
    pub named: TypeId,
    /// Its type-name symbol.
    pub type_name: SymbolId,
    /// The member found at the end of the path, or `None` when the final
    /// index does not select anything on the declaring type.
    pub member: Option<SymbolId>,
}

/// Walk `selection`'s embedding path and return the declaring type.
///
/// For fields every index but the last selects an embedded field, and
/// the struct reached is the owner.  For methods every index is walked:
/// the final hop yields the method's receiver type, or for interfaces the
/// interface that contributed the method.  The result must be a defined
/// type declared at package level.
pub fn declaring_type(graph: &TypeGraph, selection: &Selection) -> Result<DeclaringType, NotFound> {
    let index = &selection.index;
    let Some(&last) = index.last() else {
        return Err(NotFound::new("selection has an empty index path"));
    };
    let is_method = selection.kind != SelectionKind::FieldVal;
    let hops = if is_method {
        &index[..]
    } else {
        &index[..index.len() - 1]
    };

    let mut ty = selection.recv;
    for (k, &i) in hops.iter().enumerate() {
        let final_hop = k + 1 == hops.len();
        ty = match hop(graph, ty, i as usize, final_hop && is_method) {
            Some(next) => next,
            None => {
                debug!(?index, hop = k, "failed to get method/field on receiver");
                return Err(NotFound::new(format!(
                    "no field or method at index {:?} on receiver",
                    index
                )));
            }
        };
    }

    let named = graph.deref(ty);
    let type_name = graph
        .named_obj(named)
        .filter(|&obj| graph.is_package_level(obj))
        .ok_or_else(|| NotFound::new("receiver is not a top-level named type"))?;

    let member = if is_method {
        Some(selection.obj)
    } else {
        field_at(graph, named, last as usize)
    };
    debug!(
        owner = %graph[type_name].name,
        found = member.is_some(),
        "declaring type"
    );
    Ok(DeclaringType {
        named,
        type_name,
        member,
    })
}

/// Follow one index from `ty`.
///
/// Pointers are dereferenced and defined types unwrapped to their
/// underlying struct, whose `index`-th field's type is the result.  On
/// the final hop of a method selection the receiver of the `index`-th
/// method is returned instead.
fn hop(graph: &TypeGraph, mut ty: TypeId, index: usize, method: bool) -> Option<TypeId> {
    for _ in 0..MAX_HOP_DEPTH {
        match &graph[ty] {
            Type::Pointer { elem } => ty = *elem,
            Type::Named {
                underlying,
                methods,
                ..
            } => {
                if !method {
                    ty = *underlying;
                    continue;
                }
                if let Type::Interface {
                    methods: iface_methods,
                    ..
                } = &graph[graph.deref(*underlying)]
                {
                    let recv = receiver(graph, *iface_methods.get(index)?)?;
                    // Declared directly in the literal of this type.
                    if recv == *underlying {
                        return Some(ty);
                    }
                    return Some(recv);
                }
                return receiver(graph, *methods.get(index)?);
            }
            Type::Struct { fields } => return graph[*fields.get(index)?].ty,
            // The index is into the flattened method set; the receiver
            // names the interface that contributed the method.
            Type::Interface { methods, .. } => return receiver(graph, *methods.get(index)?),
            _ => return None,
        }
    }
    None
}

fn receiver(graph: &TypeGraph, method: SymbolId) -> Option<TypeId> {
    match &graph[graph[method].ty?] {
        Type::Signature { recv, .. } => *recv,
        _ => None,
    }
}

fn field_at(graph: &TypeGraph, named: TypeId, index: usize) -> Option<SymbolId> {
    match &graph[graph.underlying(named)] {
        Type::Struct { fields } => fields.get(index).copied(),
        _ => None,
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
