//! Storage Infrastructure
//!
//! This module provides [`Arena`] and [`Allocator`] as the allocation layer of
//! the node-based containers in this crate. [`GenericArena`] and
//! [`BoundedArena`] are the two stock arenas, [`Global`] and [`Bounded`] are
//! the allocation policies that produce them.
//!
//! An arena hands out slots in two phases: a slot is first
//! [reserved](Arena::try_reserve), which is the only step that can run out of
//! storage, and then [filled](Arena::fill) with the constructed data. If the
//! data cannot be constructed, the slot is [released](Arena::release) and the
//! arena is left exactly as it was. [`Reservation`] wraps the first phase in a
//! guard, so a constructor that fails or panics cannot leak a slot.
//!
//! An [`Allocator`] is a cheap, clonable policy value. A container keeps the
//! policy around and [rebinds](Allocator::rebind) it to an arena of whatever
//! node type it actually stores.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem;

use thiserror::Error;

/// The error type for a failed slot reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum AllocError {
    /// A fixed-capacity arena has no vacant slot left.
    #[error("arena is full (capacity {capacity})")]
    Full { capacity: usize },
    /// The underlying heap allocation failed.
    #[error("out of memory")]
    OutOfMemory,
}

/// A generic arena pointer.
///
/// The pointer can only be handed out by an [`Arena`]. One should not create
/// a pointer manually.
///
/// The internal of this pointer is a raw index into the arena and the
/// generation of the slot at the time it was handed out. Once the slot is
/// deallocated its generation moves on, so the pointer no longer resolves
/// even if the slot is reused.
///
/// # Type Parameters
///
/// - `Data`: The type of the stored data, which is the same as the data type in
///   the arena.
pub struct GenericPtr<Data> {
    /// The raw index of the pointer.
    index: usize,
    /// The generation of the slot.
    generation: u64,
    _phantom: PhantomData<Data>,
}

impl<Data> GenericPtr<Data> {
    fn new(index: usize, generation: u64) -> Self {
        Self {
            index,
            generation,
            _phantom: PhantomData,
        }
    }

    fn index(self) -> usize { self.index }
}

impl<Data> Clone for GenericPtr<Data> {
    fn clone(&self) -> Self { *self }
}

impl<Data> Copy for GenericPtr<Data> {}

impl<Data> Hash for GenericPtr<Data> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
        self.generation.hash(state);
    }
}

impl<Data> PartialEq for GenericPtr<Data> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.generation == other.generation
    }
}

impl<Data> Eq for GenericPtr<Data> {}

impl<Data> PartialOrd for GenericPtr<Data> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl<Data> Ord for GenericPtr<Data> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.index, self.generation).cmp(&(other.index, other.generation))
    }
}

impl<Data> fmt::Debug for GenericPtr<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "*{}", self.index) }
}

impl<Data> fmt::Display for GenericPtr<Data> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "*{}", self.index) }
}

/// A trait for an arena that stores data in slots addressed by
/// [`GenericPtr`].
///
/// # Type Parameters
///
/// - `Data`: The type of the stored data.
pub trait Arena<Data> {
    /// Reserve a slot for one entry without constructing anything in it.
    ///
    /// # Returns
    ///
    /// - `Ok(ptr)`: The reserved slot, which must be either
    ///   [filled](Arena::fill) or [released](Arena::release).
    /// - `Err(AllocError)`: No storage is available. The arena is unchanged.
    fn try_reserve(&mut self) -> Result<GenericPtr<Data>, AllocError>;

    /// Store constructed data into a reserved slot.
    ///
    /// # Panics
    ///
    /// Panics if `ptr` is not a reserved slot of this arena.
    fn fill(&mut self, ptr: GenericPtr<Data>, data: Data);

    /// Give back a reserved slot that was never filled.
    ///
    /// Releasing a slot that is not reserved does nothing.
    fn release(&mut self, ptr: GenericPtr<Data>);

    /// Deallocate the data of the pointer from the arena.
    ///
    /// # Returns
    ///
    /// - `Some(Data)`: The data of the deallocated pointer.
    /// - `None`: The pointer is invalid.
    fn try_dealloc(&mut self, ptr: GenericPtr<Data>) -> Option<Data>;

    /// Try to dereference a pointer.
    ///
    /// # Returns
    ///
    /// - `Some(&Data)`: A reference to the data in the arena.
    /// - `None`: The pointer is invalid, or the slot is only reserved.
    fn try_deref(&self, ptr: GenericPtr<Data>) -> Option<&Data>;

    /// Try to mutably dereference a pointer.
    fn try_deref_mut(&mut self, ptr: GenericPtr<Data>) -> Option<&mut Data>;

    /// The number of slots in use, reserved slots included.
    fn len(&self) -> usize;

    /// If no slot is in use.
    fn is_empty(&self) -> bool { self.len() == 0 }

    /// Reserve a slot and store `data` into it in one step.
    fn try_alloc(&mut self, data: Data) -> Result<GenericPtr<Data>, AllocError>
    where
        Self: Sized,
    {
        Ok(Reservation::new(self)?.fill(data))
    }
}

/// A reserved but not yet filled slot.
///
/// Dropping the reservation without calling [`fill`](Reservation::fill)
/// releases the slot, which covers both an early return and an unwinding
/// panic in the code that constructs the data.
pub struct Reservation<'a, Data, A>
where
    A: Arena<Data>,
{
    arena: &'a mut A,
    ptr: GenericPtr<Data>,
    filled: bool,
}

impl<'a, Data, A> Reservation<'a, Data, A>
where
    A: Arena<Data>,
{
    /// Reserve a slot in `arena`.
    pub fn new(arena: &'a mut A) -> Result<Self, AllocError> {
        let ptr = arena.try_reserve()?;
        Ok(Self {
            arena,
            ptr,
            filled: false,
        })
    }

    /// The pointer the data will live at once filled.
    pub fn ptr(&self) -> GenericPtr<Data> { self.ptr }

    /// Store the data and keep the slot.
    pub fn fill(mut self, data: Data) -> GenericPtr<Data> {
        self.arena.fill(self.ptr, data);
        self.filled = true;
        self.ptr
    }
}

impl<Data, A> Drop for Reservation<'_, Data, A>
where
    A: Arena<Data>,
{
    fn drop(&mut self) {
        if !self.filled {
            self.arena.release(self.ptr);
        }
    }
}

/// An entry in a generic arena.
enum GenericEntry<Data> {
    /// The entry is vacant.
    ///
    /// The free list is not ordered by its index, but by the order of
    /// de-allocation, the last deallocated entry will be the first entry in
    /// the free list.
    Vacant {
        /// The index of the next vacant entry.
        next: Option<usize>,
    },
    /// The entry is handed out but holds no data yet.
    Reserved,
    /// The entry is occupied.
    Occupied(Data),
}

/// A slot in a generic arena.
struct GenericSlot<Data> {
    /// Bumped every time the slot becomes vacant.
    generation: u64,
    entry: GenericEntry<Data>,
}

/// A growable arena.
///
/// Reservation only fails if the backing vector cannot grow.
///
/// # Examples
///
/// ```
/// use fwdlist::infra::storage::{Arena, GenericArena};
///
/// let mut arena = GenericArena::default();
///
/// let one = arena.try_alloc(1).unwrap();
/// let two = arena.try_alloc(2).unwrap();
/// assert_ne!(one, two);
///
/// assert_eq!(arena.try_deref(one), Some(&1));
/// *arena.try_deref_mut(two).unwrap() = 3;
/// assert_eq!(arena.try_deref(two), Some(&3));
///
/// assert_eq!(arena.try_dealloc(one), Some(1));
/// let three = arena.try_alloc(4).unwrap();
/// // the slot is reused, the old pointer does not resolve to the new data
/// assert_eq!(arena.try_deref(one), None);
/// assert_eq!(arena.try_deref(three), Some(&4));
/// ```
pub struct GenericArena<Data> {
    /// The slots in the arena.
    slots: Vec<GenericSlot<Data>>,
    /// The head of the free list.
    ///
    /// This is the index of the first vacant entry, also the last deallocated
    /// entry.
    free_head: Option<usize>,
    /// Number of entries that are not vacant.
    len: usize,
}

impl<Data> Default for GenericArena<Data> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }
}

impl<Data> GenericArena<Data> {
    /// Iterate over the stored data in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Data> {
        self.slots.iter().filter_map(|slot| match &slot.entry {
            GenericEntry::Occupied(value) => Some(value),
            GenericEntry::Vacant { .. } | GenericEntry::Reserved => None,
        })
    }

    /// The entry `ptr` refers to, if the slot has not been vacated since.
    fn entry(&self, ptr: GenericPtr<Data>) -> Option<&GenericEntry<Data>> {
        self.slots
            .get(ptr.index())
            .filter(|slot| slot.generation == ptr.generation)
            .map(|slot| &slot.entry)
    }

    fn entry_mut(&mut self, ptr: GenericPtr<Data>) -> Option<&mut GenericEntry<Data>> {
        self.slots
            .get_mut(ptr.index())
            .filter(|slot| slot.generation == ptr.generation)
            .map(|slot| &mut slot.entry)
    }

    fn push_free(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        slot.generation += 1;
        slot.entry = GenericEntry::Vacant {
            next: self.free_head,
        };
        self.free_head = Some(index);
        self.len -= 1;
    }
}

impl<Data> Arena<Data> for GenericArena<Data> {
    fn try_reserve(&mut self) -> Result<GenericPtr<Data>, AllocError> {
        let index = match self.free_head.take() {
            Some(index) => {
                let slot = &mut self.slots[index];
                self.free_head = match slot.entry {
                    // the vacant will be taken, so the next will be the new `free_head`
                    GenericEntry::Vacant { next } => next,
                    // we have a `free_head`, this entry should be vacant
                    GenericEntry::Reserved | GenericEntry::Occupied(_) => unreachable!(),
                };
                slot.entry = GenericEntry::Reserved;
                index
            }
            None => {
                self.slots
                    .try_reserve(1)
                    .map_err(|_| AllocError::OutOfMemory)?;
                self.slots.push(GenericSlot {
                    generation: 0,
                    entry: GenericEntry::Reserved,
                });
                self.slots.len() - 1
            }
        };
        self.len += 1;
        Ok(GenericPtr::new(index, self.slots[index].generation))
    }

    fn fill(&mut self, ptr: GenericPtr<Data>, data: Data) {
        match self.entry_mut(ptr) {
            Some(entry) if matches!(entry, GenericEntry::Reserved) => {
                *entry = GenericEntry::Occupied(data)
            }
            _ => panic!("filling slot {} which is not reserved", ptr),
        }
    }

    fn release(&mut self, ptr: GenericPtr<Data>) {
        if let Some(GenericEntry::Reserved) = self.entry(ptr) {
            self.push_free(ptr.index());
        }
    }

    fn try_dealloc(&mut self, ptr: GenericPtr<Data>) -> Option<Data> {
        let entry = self.entry_mut(ptr)?;
        if !matches!(entry, GenericEntry::Occupied(_)) {
            return None;
        }
        let old_entry = mem::replace(entry, GenericEntry::Reserved);
        self.push_free(ptr.index());
        match old_entry {
            GenericEntry::Occupied(data) => Some(data),
            GenericEntry::Vacant { .. } | GenericEntry::Reserved => unreachable!(),
        }
    }

    fn try_deref(&self, ptr: GenericPtr<Data>) -> Option<&Data> {
        match self.entry(ptr)? {
            GenericEntry::Occupied(value) => Some(value),
            GenericEntry::Vacant { .. } | GenericEntry::Reserved => None,
        }
    }

    fn try_deref_mut(&mut self, ptr: GenericPtr<Data>) -> Option<&mut Data> {
        match self.entry_mut(ptr)? {
            GenericEntry::Occupied(value) => Some(value),
            GenericEntry::Vacant { .. } | GenericEntry::Reserved => None,
        }
    }

    fn len(&self) -> usize { self.len }
}

/// An arena that never holds more than a fixed number of entries.
///
/// Entries grow on demand like [`GenericArena`], but once `capacity` slots
/// are in use reservation fails with [`AllocError::Full`].
pub struct BoundedArena<Data> {
    inner: GenericArena<Data>,
    capacity: usize,
}

impl<Data> BoundedArena<Data> {
    /// Create an empty arena. Nothing is allocated until the first
    /// reservation.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: GenericArena::default(),
            capacity,
        }
    }

    /// The maximum number of slots in use at once.
    pub fn capacity(&self) -> usize { self.capacity }

    /// The number of slots that can still be reserved.
    pub fn remaining(&self) -> usize { self.capacity - self.inner.len() }
}

impl<Data> Arena<Data> for BoundedArena<Data> {
    fn try_reserve(&mut self) -> Result<GenericPtr<Data>, AllocError> {
        if self.inner.len() >= self.capacity {
            return Err(AllocError::Full {
                capacity: self.capacity,
            });
        }
        self.inner.try_reserve()
    }

    fn fill(&mut self, ptr: GenericPtr<Data>, data: Data) { self.inner.fill(ptr, data) }

    fn release(&mut self, ptr: GenericPtr<Data>) { self.inner.release(ptr) }

    fn try_dealloc(&mut self, ptr: GenericPtr<Data>) -> Option<Data> {
        self.inner.try_dealloc(ptr)
    }

    fn try_deref(&self, ptr: GenericPtr<Data>) -> Option<&Data> { self.inner.try_deref(ptr) }

    fn try_deref_mut(&mut self, ptr: GenericPtr<Data>) -> Option<&mut Data> {
        self.inner.try_deref_mut(ptr)
    }

    fn len(&self) -> usize { self.inner.len() }
}

/// An allocation policy.
///
/// The policy does not store anything itself. A container clones it freely
/// and calls [`rebind`](Allocator::rebind) to get an arena for the node type
/// it stores, which need not be the element type the container is declared
/// with.
///
/// Cloning a policy must not fail or panic.
pub trait Allocator: Clone {
    /// The arena this policy produces for `Data`.
    type Rebound<Data>: Arena<Data>;

    /// Create an empty arena for `Data`.
    fn rebind<Data>(&self) -> Self::Rebound<Data>;
}

/// The default policy, backed by a [`GenericArena`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Global;

impl Allocator for Global {
    type Rebound<Data> = GenericArena<Data>;

    fn rebind<Data>(&self) -> GenericArena<Data> { GenericArena::default() }
}

/// A policy that caps every arena it produces, backed by a [`BoundedArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Bounded {
    capacity: usize,
}

impl Bounded {
    /// Create a policy whose arenas hold at most `capacity` entries.
    pub fn new(capacity: usize) -> Self { Self { capacity } }

    /// The capacity of every arena this policy produces.
    pub fn capacity(&self) -> usize { self.capacity }
}

impl Allocator for Bounded {
    type Rebound<Data> = BoundedArena<Data>;

    fn rebind<Data>(&self) -> BoundedArena<Data> { BoundedArena::with_capacity(self.capacity) }
}
