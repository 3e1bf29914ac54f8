//! Chains extracted from a tree, checked against tree wide forward kinematics

#[cfg(test)]
mod tests {
    use nalgebra::Isometry3;

    use crate::forward::{ChainForwardKinematics, TreeForwardKinematics};
    use crate::jacobian::{numeric_jacobian, JacobianSolver};
    use crate::joint::{Joint, JointType};
    use crate::kinematic_traits::ForwardKinematics;
    use crate::kinematics_error::{ErrorKind, KinematicsError};
    use crate::segment::Segment;
    use crate::tests::test_utils;
    use crate::tree::Tree;
    use crate::twist::Twist;
    use crate::utils::assert_pose_eq;
    use crate::velocity::ChainVelocityKinematics;

    const PAIRS: [(&str, &str); 7] = [
        ("left_hand", "right_lower"),
        ("camera_tilt", "left_lower"),
        ("root", "left_hand"),
        ("left_lower", "left_upper"),
        ("right_lower", "base"),
        ("head", "camera_tilt"),
        ("torso", "torso"),
    ];

    #[test]
    fn test_humanoid_counts() {
        let tree = test_utils::humanoid().unwrap();
        assert_eq!(tree.segment_count(), 9);
        assert_eq!(tree.joint_count(), 7);
        assert_eq!(tree.children("torso").unwrap(), ["left_upper", "right_upper", "head"]);

        let across = tree.get_chain("left_hand", "right_lower").unwrap();
        assert_eq!(across.segment_count(), 5);
        assert_eq!(across.joint_count(), 4);
        let inverted: Vec<bool> = across.links().map(|l| l.is_inverted()).collect();
        assert_eq!(inverted, vec![true, true, true, false, false]);
    }

    #[test]
    fn test_chain_matches_tree_poses() {
        let tree = test_utils::humanoid().unwrap();
        let tree_fk = TreeForwardKinematics::new(&tree);
        let mut rng = test_utils::random_source(21);
        for _ in 0..5 {
            let qs = test_utils::random_joints(&mut rng, tree.joint_count());
            for (from, to) in PAIRS {
                let chain = tree.get_chain(from, to).unwrap();
                let chain_qs = test_utils::chain_joints(&tree, &chain, &qs);
                let relative = ChainForwardKinematics::new(&chain).forward(&chain_qs).unwrap();
                let expected = tree_fk.forward(&qs, from).unwrap().inverse() * tree_fk.forward(&qs, to).unwrap();
                assert_pose_eq(&relative, &expected, 1e-9, 1e-9);
            }
        }
    }

    #[test]
    fn test_reverse_chain_is_inverse() {
        let tree = test_utils::humanoid().unwrap();
        let mut rng = test_utils::random_source(22);
        let qs = test_utils::random_joints(&mut rng, tree.joint_count());
        for (from, to) in PAIRS {
            let there = tree.get_chain(from, to).unwrap();
            let back = tree.get_chain(to, from).unwrap();
            assert_eq!(there.joint_count(), back.joint_count());
            assert_eq!(there.segment_count(), back.segment_count());

            let forth_pose = ChainForwardKinematics::new(&there)
                .forward(&test_utils::chain_joints(&tree, &there, &qs)).unwrap();
            let back_pose = ChainForwardKinematics::new(&back)
                .forward(&test_utils::chain_joints(&tree, &back, &qs)).unwrap();
            assert_pose_eq(&(forth_pose * back_pose), &Isometry3::identity(), 1e-9, 1e-9);
        }
    }

    #[test]
    fn test_root_chains_match_tree_forward() {
        let tree = test_utils::humanoid().unwrap();
        let tree_fk = TreeForwardKinematics::new(&tree);
        let mut rng = test_utils::random_source(23);
        let qs = test_utils::random_joints(&mut rng, tree.joint_count());
        for (name, _) in tree.elements() {
            let chain = tree.get_chain(tree.root_name(), name).unwrap();
            assert!(chain.links().all(|l| !l.is_inverted()));
            let pose = ChainForwardKinematics::new(&chain)
                .forward(&test_utils::chain_joints(&tree, &chain, &qs)).unwrap();
            assert_pose_eq(&pose, &tree_fk.forward(&qs, name).unwrap(), 1e-12, 1e-9);
        }
    }

    #[test]
    fn test_inverted_links_in_jacobian_and_velocity() {
        let tree = test_utils::humanoid().unwrap();
        let mut rng = test_utils::random_source(24);
        for (from, to) in PAIRS {
            let chain = tree.get_chain(from, to).unwrap();
            if chain.joint_count() == 0 {
                continue;
            }
            let qs = test_utils::random_joints(&mut rng, chain.joint_count());
            let analytic = JacobianSolver::new(&chain).jacobian(&qs).unwrap();
            let numeric = numeric_jacobian(&ChainForwardKinematics::new(&chain), &qs, 1e-4).unwrap();
            test_utils::assert_jacobian_eq(from, &analytic, &numeric, 1e-4);

            let qdots = vec![0.7; chain.joint_count()];
            let twist = ChainVelocityKinematics::new(&chain).forward(&qs, &qdots).unwrap().twist;
            let expected: Twist = analytic.multiply(&qdots).unwrap();
            assert!(twist.approx_eq(&expected, 1e-6), "{} -> {}: {:?} vs {:?}", from, to, twist, expected);
        }
    }

    #[test]
    fn test_unknown_names() {
        let tree = test_utils::humanoid().unwrap();
        assert!(matches!(tree.get_chain("left_hand", "tail"), Err(KinematicsError::UnknownSegment(n)) if n == "tail"));
        assert!(matches!(tree.get_sub_tree("tail"), Err(KinematicsError::UnknownSegment(_))));
        let error = TreeForwardKinematics::new(&tree).forward(&[0.0; 7], "tail").unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Structural);
    }

    #[test]
    fn test_failed_mutations_leave_tree_unchanged() {
        let mut tree = test_utils::humanoid().unwrap();
        let before = tree.clone();

        let duplicate = Segment::new("head", Joint::new("again", JointType::RotateX), Isometry3::identity());
        assert!(tree.add_segment(duplicate, "torso").is_err());
        let orphan = Segment::new("tail", Joint::new("wag", JointType::RotateX), Isometry3::identity());
        assert!(tree.add_segment(orphan, "pelvis").is_err());

        let clashing = tree.get_sub_tree("left_upper").unwrap();
        assert!(matches!(tree.add_tree(&clashing, "head"), Err(KinematicsError::DuplicateSegment(_))));

        let extracted = tree.get_chain("left_hand", "right_lower").unwrap();
        assert!(tree.add_chain(&extracted, "root").is_err());

        assert_eq!(tree, before);
    }

    #[test]
    fn test_sub_tree_grafted_elsewhere_keeps_kinematics() {
        let tree = test_utils::humanoid().unwrap();
        let arm = tree.get_sub_tree("torso").unwrap();
        assert_eq!(arm.root_name(), "torso");
        assert_eq!(arm.segment_count(), 7);
        assert_eq!(arm.joint_count(), 5);

        // Same structure below the torso, joints renumbered from zero in the same order.
        for (name, element) in arm.elements() {
            if name == arm.root_name() {
                continue;
            }
            let original = tree.segment(name).unwrap();
            assert_eq!(element.segment(), original.segment());
            assert_eq!(element.children(), original.children());
            assert_eq!(element.parent(), original.parent());
            assert_eq!(element.q_nr(), original.q_nr().map(|q| q - 2));
        }

        let mut rng = test_utils::random_source(25);
        let qs = test_utils::random_joints(&mut rng, arm.joint_count());
        let mut full_qs = vec![0.3, -0.2];
        full_qs.extend_from_slice(&qs);
        let torso = TreeForwardKinematics::new(&tree).forward(&full_qs, "torso").unwrap();
        let in_tree = TreeForwardKinematics::new(&tree).forward(&full_qs, "right_lower").unwrap();
        let in_sub = TreeForwardKinematics::new(&arm).forward(&qs, "right_lower").unwrap();
        assert_pose_eq(&(torso * in_sub), &in_tree, 1e-12, 1e-9);

        // Grafted on a different tree the sub tree is independent of the source.
        let mut stand = Tree::with_root("world");
        stand.add_segment(Segment::fixed("pedestal", Isometry3::translation(0.0, 0.0, 1.0)), "world").unwrap();
        stand.add_tree(&arm, "pedestal").unwrap();
        assert_eq!(stand.joint_count(), 5);
        assert_eq!(stand.parent("left_upper"), Some("pedestal"));
        let grafted = TreeForwardKinematics::new(&stand).forward(&qs, "right_lower").unwrap();
        assert_pose_eq(&grafted, &(Isometry3::translation(0.0, 0.0, 1.0) * in_sub), 1e-12, 1e-9);
        assert_eq!(tree, test_utils::humanoid().unwrap());
    }
}
