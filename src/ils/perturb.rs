//! Random relocation used to kick the search out of a local optimum.

use rand::Rng;

use crate::model::Assignment;

/// Number of relocations a perturbation performs for `task_count` tasks.
///
/// `floor(rate × task_count)`, but at least one for any positive rate.
pub fn perturbation_count(task_count: usize, rate: f64) -> usize {
    if rate <= 0.0 {
        return 0;
    }
    ((task_count as f64 * rate) as usize).max(1)
}

/// Applies `perturbation_count` random relocations and returns how many
/// actually moved a task.
///
/// Each draw picks a machine uniformly; if it holds tasks, one of them is
/// picked uniformly and moved to a uniformly chosen *different* machine.
/// Draws that hit an empty machine are spent without a move, and nothing
/// moves when there is only one machine.
pub fn perturb<R: Rng>(assignment: &mut Assignment, rate: f64, rng: &mut R) -> usize {
    let machines = assignment.machine_count();
    let draws = perturbation_count(assignment.task_count(), rate);
    if machines < 2 {
        return 0;
    }

    let mut moved = 0;
    for _ in 0..draws {
        let from = rng.random_range(0..machines);
        let len = assignment.machines()[from].len();
        if len == 0 {
            continue;
        }
        let index = rng.random_range(0..len);
        let mut to = rng.random_range(0..machines - 1);
        if to >= from {
            to += 1;
        }
        assignment.move_task(from, index, to);
        moved += 1;
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;
    use crate::random::create_rng;

    fn spread(count: u32, machines: usize) -> Assignment {
        let mut groups = vec![Vec::new(); machines];
        for i in 0..count {
            groups[i as usize % machines].push(Task::new(i, u64::from(i % 7 + 1)));
        }
        Assignment::from_machines(groups).unwrap()
    }

    #[test]
    fn test_perturbation_count() {
        assert_eq!(perturbation_count(100, 0.0), 0);
        assert_eq!(perturbation_count(100, 0.1), 10);
        assert_eq!(perturbation_count(5, 0.1), 1);
        assert_eq!(perturbation_count(0, 0.5), 1);
        assert_eq!(perturbation_count(31, 1.0), 31);
    }

    #[test]
    fn test_perturb_conserves_tasks() {
        let mut a = spread(40, 5);
        let ids = a.task_ids();
        let total = a.total_load();
        let mut rng = create_rng(42);
        let moved = perturb(&mut a, 0.5, &mut rng);

        assert!(moved > 0 && moved <= 20);
        assert_eq!(a.task_ids(), ids);
        assert_eq!(a.total_load(), total);
        assert_eq!(a.move_count(), moved);
    }

    #[test]
    fn test_perturb_single_machine_is_noop() {
        let mut a = spread(10, 1);
        let before = a.clone();
        let mut rng = create_rng(1);
        assert_eq!(perturb(&mut a, 1.0, &mut rng), 0);
        assert_eq!(a, before);
    }

    #[test]
    fn test_perturb_zero_rate_is_noop() {
        let mut a = spread(10, 3);
        let before = a.clone();
        let mut rng = create_rng(1);
        assert_eq!(perturb(&mut a, 0.0, &mut rng), 0);
        assert_eq!(a, before);
    }

    #[test]
    fn test_perturb_reproducible() {
        let mut a = spread(30, 4);
        let mut b = a.clone();
        perturb(&mut a, 0.3, &mut create_rng(9));
        perturb(&mut b, 0.3, &mut create_rng(9));
        assert_eq!(a, b);
    }
}
