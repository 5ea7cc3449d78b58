use core::value::{ArenaText, ObjectRef, Value};

/// A runtime object's payload. Cons cells are the only kind built at
/// execution time — symbol and string atoms are allocated directly in the
/// parse arena (see [`ArenaText`]) and never pass through this pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectBody {
    ConsCell { head: Value, tail: Value },
}

/// A heap object plus its reference count. `refcount` is only ever mutated
/// by the VM's push/pop discipline and the cons constructor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Object {
    pub refcount: i32,
    pub body: ObjectBody,
}

impl Object {
    fn new(body: ObjectBody) -> Self {
        Object { refcount: 0, body }
    }
}

/// The runtime heap object pool — cons cells built while the VM executes.
/// Slots freed by refcount reaching zero are soft-deleted onto a free list
/// and reused by the next allocation, rather than reclaimed immediately — a
/// cons cell may still be reachable through another live reference to the
/// same object.
#[derive(Default)]
pub struct ObjectHeap {
    objects: Vec<Object>,
    free_list: Vec<usize>,
}

impl ObjectHeap {
    pub fn new() -> Self {
        ObjectHeap::default()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Number of slots currently soft-deleted and awaiting reuse.
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }

    fn insert(&mut self, body: ObjectBody) -> ObjectRef {
        if let Some(idx) = self.free_list.pop() {
            self.objects[idx] = Object::new(body);
            ObjectRef::Heap(idx)
        } else {
            self.objects.push(Object::new(body));
            ObjectRef::Heap(self.objects.len() - 1)
        }
    }

    pub fn alloc_cons(&mut self, head: Value, tail: Value) -> ObjectRef {
        self.insert(ObjectBody::ConsCell { head, tail })
    }

    pub fn get(&self, r: ObjectRef) -> &Object {
        match r {
            ObjectRef::Heap(idx) => &self.objects[idx],
            ObjectRef::Arena(_) => panic!("ObjectHeap::get called with an arena-backed reference"),
        }
    }

    pub fn get_mut(&mut self, r: ObjectRef) -> &mut Object {
        match r {
            ObjectRef::Heap(idx) => &mut self.objects[idx],
            ObjectRef::Arena(_) => panic!("ObjectHeap::get_mut called with an arena-backed reference"),
        }
    }

    /// Increments an object's refcount. Called whenever a `Heap`-backed
    /// `Object` value is pushed onto the VM stack or copied into a cons
    /// cell. Arena-backed references (symbol/string atoms) are never
    /// refcounted — they live and die with their arena.
    pub fn incref(&mut self, r: ObjectRef) {
        let idx = match r {
            ObjectRef::Heap(idx) => idx,
            ObjectRef::Arena(_) => return,
        };
        self.objects[idx].refcount += 1;
        tracing::trace!(slot = idx, refcount = self.objects[idx].refcount, "incref");
    }

    /// Decrements an object's refcount, soft-deleting it onto the free list
    /// once it hits zero. Returns `true` if this call freed the slot. A
    /// no-op for arena-backed references.
    pub fn decref(&mut self, r: ObjectRef) -> bool {
        let idx = match r {
            ObjectRef::Heap(idx) => idx,
            ObjectRef::Arena(_) => return false,
        };
        let obj = &mut self.objects[idx];
        core::asserts::invariant(obj.refcount > 0, "refcount underflow on decref");
        obj.refcount -= 1;
        tracing::trace!(slot = idx, refcount = obj.refcount, "decref");
        if obj.refcount == 0 {
            self.free_list.push(idx);
            true
        } else {
            false
        }
    }

    /// Drains the free list. A stand-in for a real mark-sweep collector:
    /// soft-deleted slots are already unreachable, this just clears the
    /// bookkeeping rather than reclaiming anything further.
    pub fn collect_garbage(&mut self) {
        tracing::debug!(reclaimed = self.free_list.len(), "collecting garbage");
        self.free_list.clear();
    }

    /// Renders a value in the canonical form used by both the `print`
    /// builtin and the diagnostics tooling: `Nil → ()`, strings quoted,
    /// symbols bracketed, cons cells as dotted pairs recursively.
    pub fn display_plain(&self, value: Value) -> String {
        match value {
            Value::Nil => "()".to_string(),
            Value::F64(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Operator(op) => op.as_str().to_string(),
            Value::ComptimeOperator(op) => format!("<{}>", op.as_str()),
            Value::Function { location } => format!("<function @{location}>"),
            Value::Object(ObjectRef::Arena(ptr)) => {
                // SAFETY: the parse arena that produced this reference is
                // kept alive by the caller for as long as the chunk/VM that
                // can reach it.
                match unsafe { ptr.as_ref() } {
                    ArenaText::Str(s) => format!("\"{s}\""),
                    ArenaText::Symbol(s) => format!("<{s}>"),
                }
            }
            Value::Object(r @ ObjectRef::Heap(_)) => match self.get(r).body {
                ObjectBody::ConsCell { head, tail } => {
                    format!("({} . {})", self.display_plain(head), self.display_plain(tail))
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_allocations_start_at_zero_refcount() {
        let mut heap = ObjectHeap::new();
        let r = heap.alloc_cons(Value::Nil, Value::Nil);
        assert_eq!(heap.get(r).refcount, 0);
    }

    #[test]
    fn decref_to_zero_frees_the_slot_for_reuse() {
        let mut heap = ObjectHeap::new();
        let r = heap.alloc_cons(Value::Nil, Value::Nil);
        heap.incref(r);
        assert!(heap.decref(r));
        assert_eq!(heap.free_count(), 1);

        let r2 = heap.alloc_cons(Value::F64(1.0), Value::Nil);
        assert_eq!(r2, r, "freed slot should be reused before growing the pool");
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn collect_garbage_clears_the_free_list() {
        let mut heap = ObjectHeap::new();
        let r = heap.alloc_cons(Value::Nil, Value::Nil);
        heap.incref(r);
        heap.decref(r);
        heap.collect_garbage();
        assert_eq!(heap.free_count(), 0);
    }

    #[test]
    fn cons_cell_display_is_dotted_pair_notation() {
        let mut heap = ObjectHeap::new();
        let r = heap.alloc_cons(Value::F64(1.0), Value::Nil);
        assert_eq!(heap.display_plain(Value::Object(r)), "(1 . ())");
    }

    #[test]
    #[should_panic]
    fn decref_below_zero_is_an_invariant_violation() {
        core::asserts::set_should_abort(true);
        let mut heap = ObjectHeap::new();
        let r = heap.alloc_cons(Value::Nil, Value::Nil);
        heap.decref(r);
    }
}
