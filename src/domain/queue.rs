//! Two-tier waiting queue.
//!
//! The queue is kept as two explicit lanes, `urgent` and `normal`, each stored
//! in service order. The observable sequence is always `urgent ++ normal`, and
//! `pop_next` drains the urgent lane first.
//!
//! # Starvation
//!
//! There is no aging. A steady stream of urgent arrivals keeps normal patients
//! waiting indefinitely.

use std::collections::VecDeque;
use std::str::FromStr;

use super::Patient;

/// Where a new urgent patient lands within the urgent lane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UrgentOrder {
    /// Newest urgent patient is served first (head insertion).
    #[default]
    Lifo,
    /// Urgent patients are served in arrival order.
    Fifo,
}

impl FromStr for UrgentOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lifo" => Ok(Self::Lifo),
            "fifo" => Ok(Self::Fifo),
            other => Err(format!("Unknown urgent order '{other}' (expected lifo or fifo)")),
        }
    }
}

impl std::fmt::Display for UrgentOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lifo => write!(f, "lifo"),
            Self::Fifo => write!(f, "fifo"),
        }
    }
}

/// Ordered collection of waiting patients.
#[derive(Debug, Clone, Default)]
pub struct WaitingQueue {
    urgent: VecDeque<Patient>,
    normal: VecDeque<Patient>,
    urgent_order: UrgentOrder,
}

impl WaitingQueue {
    #[must_use]
    pub fn new(urgent_order: UrgentOrder) -> Self {
        Self {
            urgent: VecDeque::new(),
            normal: VecDeque::new(),
            urgent_order,
        }
    }

    /// Rebuild a queue from a flat list in service order.
    ///
    /// Patients are split into lanes by their `urgent` flag; relative order
    /// within each lane is kept.
    #[must_use]
    pub fn from_patients(patients: Vec<Patient>, urgent_order: UrgentOrder) -> Self {
        let mut queue = Self::new(urgent_order);
        for patient in patients {
            if patient.urgent {
                queue.urgent.push_back(patient);
            } else {
                queue.normal.push_back(patient);
            }
        }
        queue
    }

    #[must_use]
    pub fn urgent_order(&self) -> UrgentOrder {
        self.urgent_order
    }

    /// Add a patient to the lane named by its `urgent` flag.
    pub fn enqueue(&mut self, patient: Patient) {
        if !patient.urgent {
            self.normal.push_back(patient);
            return;
        }

        match self.urgent_order {
            UrgentOrder::Lifo => self.urgent.push_front(patient),
            UrgentOrder::Fifo => self.urgent.push_back(patient),
        }
    }

    /// Remove and return the next patient to attend.
    pub fn pop_next(&mut self) -> Option<Patient> {
        self.urgent.pop_front().or_else(|| self.normal.pop_front())
    }

    #[must_use]
    pub fn peek_next(&self) -> Option<&Patient> {
        self.urgent.front().or_else(|| self.normal.front())
    }

    /// Iterate in service order.
    pub fn iter(&self) -> impl Iterator<Item = &Patient> {
        self.urgent.iter().chain(self.normal.iter())
    }

    /// Flat copy in service order, as persisted.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Patient> {
        self.iter().cloned().collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.urgent.len() + self.normal.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.urgent.is_empty() && self.normal.is_empty()
    }

    #[must_use]
    pub fn urgent_len(&self) -> usize {
        self.urgent.len()
    }

    #[must_use]
    pub fn normal_len(&self) -> usize {
        self.normal.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn patient(name: &str, urgent: bool) -> Patient {
        Patient::new(name, None, urgent).expect("Should create")
    }

    fn names(queue: &WaitingQueue) -> Vec<String> {
        queue.iter().map(|p| p.name.clone()).collect()
    }

    #[test]
    fn test_normal_is_fifo() {
        let mut queue = WaitingQueue::default();
        for name in ["A", "B", "C", "D"] {
            queue.enqueue(patient(name, false));
        }
        assert_eq!(names(&queue), ["A", "B", "C", "D"]);
    }

    #[test]
    fn test_urgent_lifo_by_default() {
        let mut queue = WaitingQueue::default();
        for name in ["A", "B", "C"] {
            queue.enqueue(patient(name, true));
        }
        assert_eq!(names(&queue), ["C", "B", "A"]);
    }

    #[test]
    fn test_mixed_arrivals() {
        let mut queue = WaitingQueue::default();
        queue.enqueue(patient("A", false));
        queue.enqueue(patient("B", true));
        queue.enqueue(patient("C", false));
        queue.enqueue(patient("D", true));

        assert_eq!(names(&queue), ["D", "B", "A", "C"]);
        assert_eq!(queue.urgent_len(), 2);
        assert_eq!(queue.normal_len(), 2);
    }

    #[test]
    fn test_urgent_fifo_policy() {
        let mut queue = WaitingQueue::new(UrgentOrder::Fifo);
        queue.enqueue(patient("A", false));
        queue.enqueue(patient("B", true));
        queue.enqueue(patient("C", true));

        assert_eq!(names(&queue), ["B", "C", "A"]);
    }

    #[test]
    fn test_pop_drains_urgent_first() {
        let mut queue = WaitingQueue::default();
        queue.enqueue(patient("A", false));
        queue.enqueue(patient("B", true));

        assert_eq!(queue.peek_next().map(|p| p.name.as_str()), Some("B"));
        assert_eq!(queue.pop_next().map(|p| p.name), Some("B".to_string()));
        assert_eq!(queue.pop_next().map(|p| p.name), Some("A".to_string()));
        assert!(queue.pop_next().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_from_patients_keeps_order() {
        let mut queue = WaitingQueue::default();
        queue.enqueue(patient("A", false));
        queue.enqueue(patient("B", true));
        queue.enqueue(patient("C", false));
        queue.enqueue(patient("D", true));

        let rebuilt = WaitingQueue::from_patients(queue.to_vec(), UrgentOrder::Lifo);
        assert_eq!(rebuilt.to_vec(), queue.to_vec());
    }

    #[test]
    fn test_urgent_order_parse() {
        assert_eq!("LIFO".parse::<UrgentOrder>(), Ok(UrgentOrder::Lifo));
        assert_eq!(" fifo ".parse::<UrgentOrder>(), Ok(UrgentOrder::Fifo));
        assert!("aging".parse::<UrgentOrder>().is_err());
    }
}
