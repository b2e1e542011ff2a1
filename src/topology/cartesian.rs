
/*!

The Cartesian topologies: `Mesh` and `Torus`.

Ports are numbered two per dimension, the even port towards decreasing coordinate and the odd port towards increasing coordinate, followed by the port to the attached node. On a two-dimensional grid this gives the five-port router of the classical mesh: west, east, north, south, local.

*/

use super::{Location,RouterClass,Topology};

///A Cartesian orthahedral region of arbitrary dimension.
#[derive(Debug)]
pub struct CartesianData
{
	pub sides: Vec<usize>,
	pub size: usize,
}

impl CartesianData
{
	pub fn new(sides:&[usize]) -> CartesianData
	{
		CartesianData{
			sides: sides.to_vec(),
			size: sides.iter().product(),
		}
	}
	pub fn unpack(&self, mut router_index:usize) -> Vec<usize>
	{
		if router_index>=self.size
		{
			panic!("router_index={} is greater than the size of the CartesianData={}",router_index,self.size);
		}
		let mut r=Vec::with_capacity(self.sides.len());
		for side in self.sides.iter()
		{
			r.push(router_index%side);
			router_index/=side;
		}
		r
	}
	pub fn pack(&self, coordinates:&[usize]) -> usize
	{
		//check that the coordinates are within the sides
		for (c,s) in coordinates.iter().zip(self.sides.iter())
		{
			if *c>=*s
			{
				panic!("coordinate {} is greater than the side {}",c,s);
			}
		}
		let mut r=0;
		let mut stride=1;
		for (i,side) in self.sides.iter().enumerate()
		{
			r+=coordinates[i]*stride;
			stride*=side;
		}
		r
	}
}

///Side of the square grid attaching `num_nodes` nodes, one per router.
fn square_side(num_nodes:usize) -> usize
{
	let side=(num_nodes as f64).sqrt().round() as usize;
	if side*side!=num_nodes
	{
		panic!("A square grid cannot attach {} nodes; the node count must be a perfect square",num_nodes);
	}
	side
}

///The mesh topology, a rectangle with corners.
///Boundary routers have the ports that would go outside the mesh with `None` as neighbour.
///Each router attaches exactly one node.
#[derive(Debug)]
pub struct Mesh
{
	cartesian_data: CartesianData,
}

impl Topology for Mesh
{
	fn num_routers(&self) -> usize
	{
		self.cartesian_data.size
	}
	fn num_nodes(&self) -> usize
	{
		self.cartesian_data.size
	}
	fn ports(&self, _router_index:usize) -> usize
	{
		2*self.cartesian_data.sides.len()+1
	}
	fn neighbour(&self, router_index:usize, port:usize) -> Location
	{
		let m=self.cartesian_data.sides.len();
		if port<2*m
		{
			let dimension=port/2;
			let delta=if port%2==0 { -1i32 as usize } else { 1 };
			let mut coordinates=self.cartesian_data.unpack(router_index);
			coordinates[dimension]=coordinates[dimension].wrapping_add(delta);
			if coordinates[dimension]>=self.cartesian_data.sides[dimension]
			{
				return Location::None;
			}
			let n_index=self.cartesian_data.pack(&coordinates);
			let n_port=if delta==1 { dimension*2 } else { dimension*2+1 };
			return Location::RouterPort{router_index:n_index, router_port:n_port};
		}
		Location::NodePort(router_index)
	}
	fn node_neighbour(&self, node_index:usize) -> Location
	{
		Location::RouterPort{
			router_index: node_index,
			router_port: 2*self.cartesian_data.sides.len(),
		}
	}
	fn distance(&self, origin:usize, destination:usize) -> usize
	{
		let coord_origin=self.cartesian_data.unpack(origin);
		let coord_destination=self.cartesian_data.unpack(destination);
		let rr=self.coordinated_routing_record(&coord_origin,&coord_destination);
		rr.iter().map(|x|x.abs() as usize).sum()
	}
	fn diameter(&self) -> usize
	{
		self.cartesian_data.sides.iter().map(|s|s-1).sum()
	}
	fn router_class(&self, router_index:usize) -> RouterClass
	{
		RouterClass::Grid{
			coordinates: self.cartesian_data.unpack(router_index),
		}
	}
	fn cartesian_data(&self) -> Option<&CartesianData>
	{
		Some(&self.cartesian_data)
	}
	fn coordinated_routing_record(&self, coordinates_a:&[usize], coordinates_b:&[usize]) -> Vec<i32>
	{
		//In a Mesh the routing record is just the difference in coordinates.
		(0..coordinates_a.len()).map(|i|coordinates_b[i] as i32-coordinates_a[i] as i32).collect()
	}
}

impl Mesh
{
	pub fn new(num_nodes:usize) -> Mesh
	{
		let side=square_side(num_nodes);
		Mesh{
			cartesian_data: CartesianData::new(&[side,side]),
		}
	}
}

///As the mesh but with 'wrap-around' links. This is a regular topology and there is no port to `None`.
#[derive(Debug)]
pub struct Torus
{
	cartesian_data: CartesianData,
}

impl Topology for Torus
{
	fn num_routers(&self) -> usize
	{
		self.cartesian_data.size
	}
	fn num_nodes(&self) -> usize
	{
		self.cartesian_data.size
	}
	fn ports(&self, _router_index:usize) -> usize
	{
		2*self.cartesian_data.sides.len()+1
	}
	fn neighbour(&self, router_index:usize, port:usize) -> Location
	{
		let m=self.cartesian_data.sides.len();
		if port<2*m
		{
			let dimension=port/2;
			let delta=if port%2==0 { -1i32 as usize } else { 1 };
			let mut coordinates=self.cartesian_data.unpack(router_index);
			let side=self.cartesian_data.sides[dimension];
			coordinates[dimension]=(coordinates[dimension]+side.wrapping_add(delta))%side;
			let n_index=self.cartesian_data.pack(&coordinates);
			let n_port=if delta==1 { dimension*2 } else { dimension*2+1 };
			return Location::RouterPort{router_index:n_index, router_port:n_port};
		}
		Location::NodePort(router_index)
	}
	fn node_neighbour(&self, node_index:usize) -> Location
	{
		Location::RouterPort{
			router_index: node_index,
			router_port: 2*self.cartesian_data.sides.len(),
		}
	}
	fn distance(&self, origin:usize, destination:usize) -> usize
	{
		let coord_origin=self.cartesian_data.unpack(origin);
		let coord_destination=self.cartesian_data.unpack(destination);
		let rr=self.coordinated_routing_record(&coord_origin,&coord_destination);
		rr.iter().map(|x|x.abs() as usize).sum()
	}
	fn diameter(&self) -> usize
	{
		self.cartesian_data.sides.iter().map(|s|s/2).sum()
	}
	fn router_class(&self, router_index:usize) -> RouterClass
	{
		RouterClass::Grid{
			coordinates: self.cartesian_data.unpack(router_index),
		}
	}
	fn cartesian_data(&self) -> Option<&CartesianData>
	{
		Some(&self.cartesian_data)
	}
	fn coordinated_routing_record(&self, coordinates_a:&[usize], coordinates_b:&[usize]) -> Vec<i32>
	{
		//In a Torus the routing record is for every difference of coordinates `d`, the minimum among `d` and `side-d` with the appropriate sign. Ties advance forward.
		(0..coordinates_a.len()).map(|i|{
			let side=self.cartesian_data.sides[i] as i32;
			let a=(side + coordinates_b[i] as i32-coordinates_a[i] as i32) % side;
			let b=(side + coordinates_a[i] as i32-coordinates_b[i] as i32) % side;
			if a<=b { a } else { -b }
		}).collect()
	}
}

impl Torus
{
	pub fn new(num_nodes:usize) -> Torus
	{
		let side=square_side(num_nodes);
		Torus{
			cartesian_data: CartesianData::new(&[side,side]),
		}
	}
}
