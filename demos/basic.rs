use nalgebra::{Isometry3, Vector3};
use rs_chain_kinematics::chain_robots::six_axis_stack;
use rs_chain_kinematics::forward::ChainForwardKinematics;
use rs_chain_kinematics::inverse_position::InversePositionSolver;
use rs_chain_kinematics::inverse_velocity::InverseVelocitySolver;
use rs_chain_kinematics::kinematic_traits::{ForwardKinematics, Joints, Pose};
use rs_chain_kinematics::twist::Twist;
use rs_chain_kinematics::utils::{as_radians, dump_joints, dump_pose};

fn main() {
    let chain = six_axis_stack();
    let robot = ChainForwardKinematics::new(&chain);

    println!("\nAll joints at zero, the arm points straight up:");
    let pose: Pose = robot.forward(&[0.0; 6]).expect("six joints"); // Pose is alias of nalgebra::Isometry3<f64>
    dump_pose(&pose);

    let joints: Joints = as_radians(&[10.0, 30.0, 60.0, -20.0, 45.0, 10.0]); // Joints are alias of Vec<f64>
    println!("\nJoints:");
    dump_joints(&joints);
    let pose = robot.forward(&joints).expect("six joints");
    dump_pose(&pose);

    let solver = InverseVelocitySolver::new(&chain);
    let twist = Twist::new(Vector3::new(0.0, 0.1, 0.0), Vector3::zeros());
    println!("\nJoint rates (deg/s) to move the tip 10 cm/s along y:");
    match solver.cartesian_to_joints(&joints, &twist) {
        Ok(qdots) => dump_joints(&qdots),
        Err(e) => println!("{}", e),
    }

    println!("\nSame at zero, where joints 1, 4 and 6 share the same axis:");
    match solver.cartesian_to_joints(&[0.0; 6], &twist) {
        Ok(qdots) => dump_joints(&qdots),
        Err(e) => println!("{}", e),
    }

    println!("\nMoving the tip 5 cm sideways with the iterative position solver:");
    let target = Isometry3::translation(0.0, 0.05, 0.0) * pose;
    match InversePositionSolver::new(&chain).cartesian_to_joints(&joints, &target) {
        Ok(solution) => {
            dump_joints(&solution);
            dump_pose(&robot.forward(&solution).expect("six joints"));
        }
        Err(e) => println!("{}", e),
    }
}
