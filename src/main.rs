use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use nalgebra::Vector3;
use tracing::info;

use rs_chain_kinematics::chain_robots::six_axis_stack;
use rs_chain_kinematics::forward::ChainForwardKinematics;
use rs_chain_kinematics::inverse_velocity::InverseVelocitySolver;
use rs_chain_kinematics::jacobian::JacobianSolver;
use rs_chain_kinematics::kinematic_traits::ForwardKinematics;
use rs_chain_kinematics::kinematics_error::{ErrorKind, KinematicsError};
use rs_chain_kinematics::solver_config::SolverConfig;
use rs_chain_kinematics::twist::Twist;
use rs_chain_kinematics::utils::{as_radians, dump_jacobian, dump_joints, dump_pose};

/// Forward kinematics, Jacobian and joint rates of the sample six axis chain.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// YAML file with solver settings (under the `solver` key)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Joint values in degrees, comma separated
    #[arg(short, long, value_delimiter = ',', allow_hyphen_values = true,
          default_value = "0,30,60,-20,45,10")]
    joints: Vec<f64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => SolverConfig::from_yaml_file(path)
            .with_context(|| format!("Reading solver settings from {}", path.display()))?,
        None => SolverConfig::default(),
    };
    info!("Solver settings: {:?}", config);

    let chain = six_axis_stack();
    let qs = as_radians(&args.joints);
    println!("Joints:");
    dump_joints(&qs);

    let pose = ChainForwardKinematics::new(&chain).forward(&qs)?;
    println!("Tip pose:");
    dump_pose(&pose);

    let jacobian = JacobianSolver::new(&chain).jacobian(&qs)?;
    println!("Jacobian (base orientation, tip reference point):");
    dump_jacobian(&jacobian);

    // Tip moving 10 cm/s up.
    let twist = Twist::new(Vector3::new(0.0, 0.0, 0.1), Vector3::zeros());
    let solver = InverseVelocitySolver::from_config(&chain, &config);
    match solver.cartesian_to_joints(&qs, &twist) {
        Ok(qdots) => {
            println!("Joint rates for {:?} (deg/s):", twist.linear);
            dump_joints(&qdots);
        }
        Err(e @ KinematicsError::Singular { .. }) => {
            println!("{}", e);
            let values = solver.singular_values(&qs)?;
            println!("Singular values: {:?}", values);
        }
        Err(e) if e.kind() == ErrorKind::Dimension => {
            return Err(e).context("Joint vector does not fit the sample chain");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}
