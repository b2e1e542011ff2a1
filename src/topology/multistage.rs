
/*!

The three-level k-ary fat-tree.

For an even arity `k` there are `k` pods, each with `k/2` edge switches and `k/2` aggregation switches, plus `(k/2)²` core switches on top. Every switch has radix `k`. Each edge switch attaches `k/2` nodes, for a total of `k³/4` nodes.

Routers are stored in the arena in level order: first the edge switches, then the aggregation switches, then the core switches. Within the first two levels the index is `pod*(k/2)+switch`.

Port plan, with `m = k/2`:
* edge `(p,s)`: ports `0..m` go to its nodes, port `m+a` goes to aggregation `(p,a)`.
* aggregation `(p,a)`: port `s` goes to edge `(p,s)`, port `m+j` goes to core `a*m+j`.
* core `a*m+j`: port `p` goes to aggregation `(p,a)`.

*/

use itertools::Itertools;

use super::{Location,RouterClass,Topology};
use crate::matrix::Matrix;

///The three-level k-ary fat-tree.
#[derive(Debug)]
pub struct FatTree
{
	///The arity `k`: switch radix and number of pods.
	arity: usize,
	///Switches on each of the edge and aggregation levels.
	switches_per_level: usize,
	///Core switches.
	num_core_switches: usize,
	///Distances between switches, precomputed at construction.
	distance_matrix: Matrix<usize>,
	///The greatest entry of the distance matrix.
	diameter: usize,
}

impl Topology for FatTree
{
	fn num_routers(&self) -> usize
	{
		2*self.switches_per_level + self.num_core_switches
	}
	fn num_nodes(&self) -> usize
	{
		self.switches_per_level * (self.arity/2)
	}
	fn ports(&self, _router_index:usize) -> usize
	{
		self.arity
	}
	fn neighbour(&self, router_index:usize, port:usize) -> Location
	{
		let m=self.arity/2;
		let level_size=self.switches_per_level;
		if router_index<level_size
		{
			//edge switch
			let pod=router_index/m;
			let switch=router_index%m;
			if port<m
			{
				return Location::NodePort(router_index*m+port);
			}
			let aggregation=port-m;
			return Location::RouterPort{
				router_index: level_size + pod*m + aggregation,
				router_port: switch,
			};
		}
		if router_index<2*level_size
		{
			//aggregation switch
			let pod=(router_index-level_size)/m;
			let switch=(router_index-level_size)%m;
			if port<m
			{
				return Location::RouterPort{
					router_index: pod*m + port,
					router_port: m+switch,
				};
			}
			let core_offset=port-m;
			return Location::RouterPort{
				router_index: 2*level_size + switch*m + core_offset,
				router_port: pod,
			};
		}
		//core switch
		let core=router_index-2*level_size;
		let group=core/m;
		let offset=core%m;
		let pod=port;
		Location::RouterPort{
			router_index: level_size + pod*m + group,
			router_port: m+offset,
		}
	}
	fn node_neighbour(&self, node_index:usize) -> Location
	{
		let m=self.arity/2;
		Location::RouterPort{
			router_index: node_index/m,
			router_port: node_index%m,
		}
	}
	fn distance(&self, origin:usize, destination:usize) -> usize
	{
		*self.distance_matrix.get(origin,destination)
	}
	fn diameter(&self) -> usize
	{
		self.diameter
	}
	fn router_class(&self, router_index:usize) -> RouterClass
	{
		let m=self.arity/2;
		let level_size=self.switches_per_level;
		if router_index<level_size
		{
			RouterClass::Edge{ pod: router_index/m, switch: router_index%m }
		}
		else if router_index<2*level_size
		{
			RouterClass::Aggregation{ pod: (router_index-level_size)/m, switch: (router_index-level_size)%m }
		}
		else
		{
			RouterClass::Core{ index: router_index-2*level_size }
		}
	}
	fn fat_tree_arity(&self) -> Option<usize>
	{
		Some(self.arity)
	}
}

impl FatTree
{
	pub fn new(arity:usize, num_nodes:usize) -> FatTree
	{
		if arity%2!=0 || arity==0
		{
			panic!("A fat-tree requires a positive even arity, got k={}",arity);
		}
		let m=arity/2;
		let expected_nodes=arity*m*m;
		if num_nodes!=expected_nodes
		{
			panic!("A k={} fat-tree attaches exactly {} nodes, not {}",arity,expected_nodes,num_nodes);
		}
		let mut tree=FatTree{
			arity,
			switches_per_level: arity*m,
			num_core_switches: m*m,
			distance_matrix: Matrix::constant(0,0,0),
			diameter: 0,
		};
		tree.distance_matrix=tree.compute_distance_matrix();
		let n=tree.num_routers();
		tree.diameter=(0..n).cartesian_product(0..n).map(|(source,target)|*tree.distance_matrix.get(source,target)).max().expect("a fat-tree has at least one switch");
		tree
	}
}
