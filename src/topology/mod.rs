
/*!

A Topology defines the way routers and nodes are connected.

see [`new_topology`](fn.new_topology.html) for the predefined topologies.

*/

pub mod cartesian;
pub mod multistage;

use std::fmt::Debug;

use self::cartesian::{CartesianData,Mesh,Torus};
use self::multistage::FatTree;
use crate::matrix::Matrix;

///A location where a flit can be inserted.
///None is used for disconnected ports, for example in the `Mesh` topology.
#[derive(Clone,Debug,Hash,Eq,PartialEq)]
pub enum Location
{
	RouterPort{
		router_index: usize,
		router_port: usize,
	},
	NodePort(usize),
	None,
}

///Item for iterators of neighbour routers.
#[derive(Debug)]
pub struct NeighbourRouterIteratorItem
{
	///Port of the current router that goes to the neighbour.
	pub port_index: usize,
	///The index of the neighbour router.
	pub neighbour_router: usize,
	///The port index of the neighbour router corresponding to the same physical link.
	pub neighbour_port: usize,
}

///The kind of switch found at a router index. Routings dispatch on this instead of parsing identifiers.
#[derive(Clone,Debug,Eq,PartialEq)]
pub enum RouterClass
{
	///A switch of a Cartesian topology, with its coordinates.
	Grid{
		coordinates: Vec<usize>,
	},
	///A fat-tree switch with nodes attached.
	Edge{
		pod: usize,
		switch: usize,
	},
	///A fat-tree switch between the edge and core levels.
	Aggregation{
		pod: usize,
		switch: usize,
	},
	///A top-level fat-tree switch.
	Core{
		index: usize,
	},
}

///A topology describes how routers and nodes are connected.
///Routers live in an arena and are addressed by index; every link is described by `neighbour` and each physical link appears as two directed entries.
pub trait Topology : Debug
{
	fn num_routers(&self) -> usize;
	fn num_nodes(&self) -> usize;
	///Number of ports of the router, including ports towards nodes and, in the mesh, non-connected ports.
	fn ports(&self, router_index:usize) -> usize;
	///The other endpoint of the link leaving `router_index` through `port`.
	fn neighbour(&self, router_index:usize, port:usize) -> Location;
	///The router port to which a node is attached.
	fn node_neighbour(&self, node_index:usize) -> Location;
	///Distance in router-to-router hops.
	fn distance(&self, origin:usize, destination:usize) -> usize;
	///The greatest distance between a pair of routers.
	fn diameter(&self) -> usize;
	///Which kind of switch sits at the index.
	fn router_class(&self, router_index:usize) -> RouterClass;
	///Specific for the Cartesian topologies, `None` for anyone else.
	fn cartesian_data(&self) -> Option<&CartesianData>
	{
		None
	}
	///Signed hops to advance on each dimension to go from `coordinates_a` to `coordinates_b`.
	fn coordinated_routing_record(&self, _coordinates_a:&[usize], _coordinates_b:&[usize]) -> Vec<i32>
	{
		unimplemented!()
	}
	///The arity `k` of a fat-tree. Other topologies should return always `None`.
	fn fat_tree_arity(&self) -> Option<usize>
	{
		None
	}
	///Iterate over the neighbour routers, skipping non-connected ports and ports towards nodes.
	///You may want to reimplement this when implementing the trait for your type.
	fn neighbour_router_iter<'a>(&'a self, router_index:usize) -> Box<dyn Iterator<Item=NeighbourRouterIteratorItem> + 'a>
	{
		let np = self.ports(router_index);
		let iterator = (0..np).filter_map(move |port_index|{
			match self.neighbour(router_index,port_index)
			{
				Location::RouterPort {router_index: neighbour_router, router_port: neighbour_port} =>
				{
					Some(NeighbourRouterIteratorItem{port_index,neighbour_router,neighbour_port})
				},
				_ => None,
			}
		});
		Box::new(iterator)
	}

	///Breadth First Search to compute distances from a router to all others.
	fn bfs(&self, origin:usize) -> Vec<usize>
	{
		let n=self.num_routers();
		#[allow(non_snake_case)]
		let mut R=vec![<usize>::MAX;n];
		R[origin]=0;
		let mut queue=vec![0;n];
		let mut queue_read_index=0;//Next to read
		let mut queue_write_index=1;//Next to write
		queue[0]=origin;
		while queue_read_index<queue_write_index
		{
			let best=queue[queue_read_index];
			queue_read_index+=1;
			for NeighbourRouterIteratorItem{neighbour_router:router_index,..} in self.neighbour_router_iter(best)
			{
				let alt=R[best].saturating_add(1);
				if alt<R[router_index]
				{
					R[router_index]=alt;
					queue[queue_write_index]=router_index;
					queue_write_index+=1;
				}
			}
		}
		R
	}

	fn compute_distance_matrix(&self) -> Matrix<usize>
	{
		let n=self.num_routers();
		let mut matrix=Matrix::constant(0,n,n);
		for i in 0..n
		{
			let d=self.bfs(i);
			for j in 0..n
			{
				*matrix.get_mut(i,j)=d[j];
			}
		}
		matrix
	}
}

///The argument of a builder function for topologies.
#[derive(Debug)]
pub struct TopologyBuilderArgument<'a>
{
	///The topology name from the configuration.
	pub name: &'a str,
	///Number of nodes the fabric must attach.
	pub num_nodes: usize,
	///The arity of the fat-tree, ignored by the grids.
	pub fat_tree_k: usize,
}

/**Build a new topology.

Recognized names:
* `"mesh"`: a rectangle of routers with corners; border ports are left non-connected.
* `"torus"`: as the mesh, with wrap-around links on every dimension.
* `"fat_tree"`: the three-level k-ary fat-tree with `k³/4` nodes.

The node count of the grids must be a perfect square; the fat-tree arity must be even and match the node count. Violations are fatal.
**/
pub fn new_topology(arg:TopologyBuilderArgument) -> Box<dyn Topology>
{
	match arg.name
	{
		"mesh" => Box::new(Mesh::new(arg.num_nodes)),
		"torus" => Box::new(Torus::new(arg.num_nodes)),
		"fat_tree" => Box::new(FatTree::new(arg.fat_tree_k,arg.num_nodes)),
		_ => panic!("Unknown topology {}",arg.name),
	}
}
