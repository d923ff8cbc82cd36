// Tue Jan 13 2026 - Alex

use super::cylinder::{Cylinder, RequesterId};
use super::waiters::Ticket;
use std::collections::{BTreeMap, VecDeque};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Waiter {
    pub requester: RequesterId,
    pub ticket: Ticket,
}

/// Pending requests of one scan direction, ordered by cylinder.
///
/// Requests for the same cylinder form a group kept in arrival order. A group
/// is dropped as soon as its last waiter is removed.
#[derive(Debug, Default)]
pub struct CylinderQueue {
    groups: BTreeMap<Cylinder, VecDeque<Waiter>>,
    len: usize,
}

impl CylinderQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, cylinder: Cylinder, waiter: Waiter) {
        self.groups.entry(cylinder).or_default().push_back(waiter);
        self.len += 1;
    }

    pub fn peek_min(&self) -> Option<Cylinder> {
        self.groups.keys().next().copied()
    }

    /// Takes the earliest waiter of the lowest cylinder.
    pub fn remove_min(&mut self) -> Option<(Cylinder, Waiter)> {
        let mut entry = self.groups.first_entry()?;
        let cylinder = *entry.key();
        let waiter = entry.get_mut().pop_front()?;
        if entry.get().is_empty() {
            entry.remove();
        }
        self.len -= 1;
        Some((cylinder, waiter))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cylinders(&self) -> Vec<Cylinder> {
        self.groups
            .iter()
            .flat_map(|(cylinder, group)| std::iter::repeat(*cylinder).take(group.len()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::disk::cylinder::MAX_CYLINDER;
    use crate::disk::waiters::WaiterArena;

    fn cyl(value: i64) -> Cylinder {
        Cylinder::checked(value, MAX_CYLINDER).unwrap()
    }

    fn push(queue: &mut CylinderQueue, arena: &mut WaiterArena, id: u32, value: i64) {
        let requester = RequesterId::new(id);
        let ticket = arena.register();
        queue.insert(cyl(value), Waiter { requester, ticket });
    }

    #[test]
    fn test_orders_by_cylinder() {
        let mut arena = WaiterArena::new();
        let mut queue = CylinderQueue::new();
        for (id, value) in [(1, 90), (2, 18), (3, 160), (4, 39)] {
            push(&mut queue, &mut arena, id, value);
        }

        assert_eq!(queue.len(), 4);
        assert_eq!(queue.peek_min(), Some(cyl(18)));

        let order: Vec<u16> = std::iter::from_fn(|| queue.remove_min())
            .map(|(cylinder, _)| cylinder.value())
            .collect();
        assert_eq!(order, vec![18, 39, 90, 160]);
        assert!(queue.is_empty());
        assert_eq!(queue.peek_min(), None);
    }

    #[test]
    fn test_duplicates_keep_arrival_order() {
        let mut arena = WaiterArena::new();
        let mut queue = CylinderQueue::new();
        push(&mut queue, &mut arena, 1, 70);
        push(&mut queue, &mut arena, 2, 70);
        push(&mut queue, &mut arena, 3, 65);

        assert_eq!(queue.cylinders(), vec![cyl(65), cyl(70), cyl(70)]);

        let ids: Vec<u32> = std::iter::from_fn(|| queue.remove_min())
            .map(|(_, waiter)| waiter.requester.as_u32())
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_empty_groups_are_dropped() {
        let mut arena = WaiterArena::new();
        let mut queue = CylinderQueue::new();
        push(&mut queue, &mut arena, 1, 12);
        push(&mut queue, &mut arena, 2, 12);

        queue.remove_min();
        assert_eq!(queue.cylinders(), vec![cyl(12)]);
        assert_eq!(queue.peek_min(), Some(cyl(12)));
        queue.remove_min();
        assert_eq!(queue.peek_min(), None);
        assert!(queue.cylinders().is_empty());
        assert_eq!(queue.remove_min(), None);
    }
}
