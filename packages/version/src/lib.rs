use winnow::{
	combinator::{opt, preceded, separated},
	prelude::*,
	token::take_while,
};


#[derive(Clone, Eq, Hash, PartialEq, serde_with::DeserializeFromStr, serde_with::SerializeDisplay)]
pub struct Version {
	major: u64,
	minor: u64,
	patch: u64,
	prerelease: Identifiers,
	build: Identifiers,
}

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Identifiers {
	components: Vec<Identifier>,
}

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Identifier {
	Number(u64),
	String(String),
}

#[derive(Clone, Debug, derive_more::Display, derive_more::Error)]
#[display("invalid version {string:?}")]
pub struct ParseError {
	pub string: String,
}

impl Version {
	pub fn parse(string: &str) -> Result<Self, ParseError> {
		string.parse()
	}

	#[must_use]
	pub fn major(&self) -> u64 {
		self.major
	}

	#[must_use]
	pub fn minor(&self) -> u64 {
		self.minor
	}

	#[must_use]
	pub fn patch(&self) -> u64 {
		self.patch
	}

	#[must_use]
	pub fn prerelease(&self) -> &Identifiers {
		&self.prerelease
	}

	#[must_use]
	pub fn build(&self) -> &Identifiers {
		&self.build
	}
}

impl Identifiers {
	#[must_use]
	pub fn components(&self) -> &[Identifier] {
		&self.components
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.components.len()
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.components.is_empty()
	}
}

impl std::fmt::Display for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
		if !self.prerelease.is_empty() {
			write!(f, "-{}", self.prerelease)?;
		}
		if !self.build.is_empty() {
			write!(f, "+{}", self.build)?;
		}
		Ok(())
	}
}

impl std::fmt::Debug for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Version").field(&self.to_string()).finish()
	}
}

impl std::fmt::Display for Identifiers {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		for (i, component) in self.components.iter().enumerate() {
			if i > 0 {
				write!(f, ".")?;
			}
			write!(f, "{component}")?;
		}
		Ok(())
	}
}

impl std::fmt::Display for Identifier {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Identifier::Number(n) => write!(f, "{n}"),
			Identifier::String(s) => write!(f, "{s}"),
		}
	}
}

impl std::str::FromStr for Version {
	type Err = ParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		version.parse(s).map_err(|_| ParseError {
			string: s.to_owned(),
		})
	}
}

fn version(input: &mut &str) -> ModalResult<Version> {
	let (major, minor, patch, prerelease, build) = (
		number,
		preceded(".", number),
		preceded(".", number),
		opt(preceded("-", identifiers)),
		opt(preceded("+", identifiers)),
	)
		.parse_next(input)?;
	Ok(Version {
		major,
		minor,
		patch,
		prerelease: prerelease.unwrap_or_default(),
		build: build.unwrap_or_default(),
	})
}

fn number(input: &mut &str) -> ModalResult<u64> {
	// Leading zeros are allowed, and the value must fit in a u64.
	take_while(1.., '0'..='9')
		.verify_map(|s: &str| s.parse().ok())
		.parse_next(input)
}

fn identifiers(input: &mut &str) -> ModalResult<Identifiers> {
	let components: Vec<Identifier> = separated(1.., identifier, ".").parse_next(input)?;
	Ok(Identifiers { components })
}

fn identifier(input: &mut &str) -> ModalResult<Identifier> {
	// An all-digit identifier is numeric, and its value must fit in a u64.
	take_while(1.., ('0'..='9', 'A'..='Z', 'a'..='z', '-'))
		.verify_map(|s: &str| {
			if s.bytes().all(|b| b.is_ascii_digit()) {
				s.parse::<u64>().ok().map(Identifier::Number)
			} else {
				Some(Identifier::String(s.to_owned()))
			}
		})
		.parse_next(input)
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.major
			.cmp(&other.major)
			.then_with(|| self.minor.cmp(&other.minor))
			.then_with(|| self.patch.cmp(&other.patch))
			.then_with(|| match (self.prerelease.is_empty(), other.prerelease.is_empty()) {
				(true, true) => std::cmp::Ordering::Equal,
				(false, true) => std::cmp::Ordering::Less,
				(true, false) => std::cmp::Ordering::Greater,
				(false, false) => self.prerelease.cmp(&other.prerelease),
			})
			.then_with(|| match (self.build.is_empty(), other.build.is_empty()) {
				(true, true) => std::cmp::Ordering::Equal,
				(false, true) => std::cmp::Ordering::Greater,
				(true, false) => std::cmp::Ordering::Less,
				(false, false) => self.build.cmp(&other.build),
			})
	}
}

impl PartialOrd for Identifiers {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Identifiers {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		// Walk both sequences to the longer length. A side that has run out
		// sorts below one that continues.
		for i in 0..self.components.len().max(other.components.len()) {
			let ordering = match (self.components.get(i), other.components.get(i)) {
				(Some(a), Some(b)) => a.cmp(b),
				(Some(_), None) => std::cmp::Ordering::Greater,
				(None, Some(_)) => std::cmp::Ordering::Less,
				(None, None) => unreachable!(),
			};
			if ordering != std::cmp::Ordering::Equal {
				return ordering;
			}
		}
		std::cmp::Ordering::Equal
	}
}

impl PartialOrd for Identifier {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl Ord for Identifier {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		match (self, other) {
			(Identifier::Number(a), Identifier::Number(b)) => a.cmp(b),
			(Identifier::String(a), Identifier::String(b)) => a.cmp(b),
			(Identifier::Number(_), Identifier::String(_)) => std::cmp::Ordering::Less,
			(Identifier::String(_), Identifier::Number(_)) => std::cmp::Ordering::Greater,
		}
	}
}
