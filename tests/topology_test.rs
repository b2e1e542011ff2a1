mod common;

use common::init_logging;
use gridnoc::topology::{new_topology,Location,Topology,TopologyBuilderArgument};

fn build(name:&str, num_nodes:usize, fat_tree_k:usize) -> Box<dyn Topology>
{
	new_topology(TopologyBuilderArgument{
		name,
		num_nodes,
		fat_tree_k,
	})
}

///Every directed link `(A,p) -> (B,q)` must be mirrored by `(B,q) -> (A,p)`,
///and every node port must agree with the node attachment map.
fn check_link_symmetry(topology:&dyn Topology, allow_disconnected:bool)
{
	for router_index in 0..topology.num_routers()
	{
		for port in 0..topology.ports(router_index)
		{
			match topology.neighbour(router_index,port)
			{
				Location::RouterPort{router_index:neighbour_index,router_port:neighbour_port} =>
				{
					let back=topology.neighbour(neighbour_index,neighbour_port);
					assert_eq!(back,Location::RouterPort{router_index,router_port:port},
						"link from router {} port {} is not symmetric",router_index,port);
				},
				Location::NodePort(node_index) =>
				{
					assert!(node_index<topology.num_nodes());
					let attachment=topology.node_neighbour(node_index);
					assert_eq!(attachment,Location::RouterPort{router_index,router_port:port},
						"node {} attachment does not match its port",node_index);
				},
				Location::None => assert!(allow_disconnected,"unexpected disconnected port at router {} port {}",router_index,port),
			}
		}
	}
}

///Every node is attached to exactly one router port.
fn check_node_attachments(topology:&dyn Topology)
{
	let mut seen=vec![false;topology.num_nodes()];
	for router_index in 0..topology.num_routers()
	{
		for port in 0..topology.ports(router_index)
		{
			if let Location::NodePort(node_index)=topology.neighbour(router_index,port)
			{
				assert!(!seen[node_index],"node {} appears on two ports",node_index);
				seen[node_index]=true;
			}
		}
	}
	assert!(seen.iter().all(|x|*x),"some node is not attached anywhere");
}

#[test]
fn mesh_structure()
{
	init_logging();
	let topology=build("mesh",16,4);
	assert_eq!(topology.num_routers(),16);
	assert_eq!(topology.num_nodes(),16);
	check_link_symmetry(topology.as_ref(),true);
	check_node_attachments(topology.as_ref());
	//The 4x4 mesh leaves one port per border router edge unconnected: 16 in total.
	let disconnected:usize=(0..topology.num_routers()).map(|router_index|{
		(0..topology.ports(router_index)).filter(|port|topology.neighbour(router_index,*port)==Location::None).count()
	}).sum();
	assert_eq!(disconnected,16);
	//Opposite corners of the 4x4 mesh are 6 hops apart.
	assert_eq!(topology.distance(0,15),6);
	assert_eq!(topology.diameter(),6);
}

#[test]
fn torus_structure()
{
	init_logging();
	let topology=build("torus",16,4);
	check_link_symmetry(topology.as_ref(),false);
	check_node_attachments(topology.as_ref());
	//Wrap-around links halve the distances of the corners.
	assert_eq!(topology.distance(0,15),2);
	assert_eq!(topology.diameter(),4);
	let mesh=build("mesh",16,4);
	assert!(topology.diameter()<mesh.diameter());
}

#[test]
fn torus_distance_is_symmetric()
{
	init_logging();
	let topology=build("torus",16,4);
	for origin in 0..topology.num_routers()
	{
		for target in 0..topology.num_routers()
		{
			assert_eq!(topology.distance(origin,target),topology.distance(target,origin));
		}
	}
}

#[test]
fn fat_tree_structure()
{
	init_logging();
	let topology=build("fat_tree",16,4);
	//k=4: 8 edge, 8 aggregation and 4 core switches.
	assert_eq!(topology.num_routers(),20);
	assert_eq!(topology.num_nodes(),16);
	check_link_symmetry(topology.as_ref(),false);
	check_node_attachments(topology.as_ref());
	//Edges of the same pod are 2 hops apart, edges of different pods 4.
	assert_eq!(topology.distance(0,1),2);
	assert_eq!(topology.distance(0,7),4);
	assert_eq!(topology.diameter(),4);
}

#[test]
fn smallest_fat_tree()
{
	init_logging();
	//k=2 is the two-node degenerate tree.
	let topology=build("fat_tree",2,2);
	assert_eq!(topology.num_nodes(),2);
	check_link_symmetry(topology.as_ref(),false);
	check_node_attachments(topology.as_ref());
}

#[test]
#[should_panic(expected="perfect square")]
fn mesh_rejects_non_square()
{
	build("mesh",10,4);
}

#[test]
#[should_panic(expected="even arity")]
fn fat_tree_rejects_odd_arity()
{
	build("fat_tree",16,3);
}

#[test]
#[should_panic(expected="attaches exactly")]
fn fat_tree_rejects_wrong_node_count()
{
	build("fat_tree",20,4);
}

#[test]
#[should_panic(expected="Unknown topology")]
fn unknown_topology_is_fatal()
{
	build("hypercube",16,4);
}
