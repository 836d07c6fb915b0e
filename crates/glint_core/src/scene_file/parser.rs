//! Line-oriented text scene parser.

use glint_math::Vec3;

use super::{SceneError, SceneResult};
use crate::{Camera, Color, GroundPlane, Light, Material, Scene, Sphere, Triangle};

/// Parse a text scene description.
///
/// Records may appear in any order. A missing `C` record leaves the
/// default camera in place; a missing `K` record leaves the sky black.
pub fn parse_scene(content: &str) -> SceneResult<Scene> {
    let mut scene = Scene::default();

    for (index, raw) in content.lines().enumerate() {
        let line_num = index + 1;
        let line = match raw.find('#') {
            Some(comment) => &raw[..comment],
            None => raw,
        };

        let mut tokens = line.split_whitespace();
        let Some(tag) = tokens.next() else {
            continue;
        };
        let mut record = Record::new(line_num, tag, tokens.collect());

        match tag {
            "S" => {
                record.expect_len(8)?;
                let centre = record.vec3()?;
                let radius = record.float()?;
                let material = record.material()?;
                log::debug!("Added sphere at {centre} (line {line_num})");
                scene.add_sphere(Sphere::new(centre, radius, material));
            }
            "L" => {
                record.expect_len(7)?;
                let colour = record.vec3()?;
                let position = record.vec3()?;
                let radius = record.float()?;
                log::debug!("Added light at {position} (line {line_num})");
                scene.add_light(Light::new(position, radius, colour));
            }
            "C" => {
                record.expect_len(14)?;
                let eye = record.vec3()?;
                let look = record.vec3()?;
                let up = record.vec3()?;
                let width = record.uint()?;
                let height = record.uint()?;
                let fov = record.float()?;
                let near = record.float()?;
                let far = record.float()?;
                log::debug!("Added camera at {eye} (line {line_num})");
                scene.camera = Camera::new(eye, look, up, width, height, fov, near, far);
            }
            "G" => {
                record.expect_len(5)?;
                let height = record.float()?;
                let material = record.material()?;
                scene.set_ground(GroundPlane::new(height, material));
            }
            "K" => {
                record.expect_len(3)?;
                scene.sky_colour = record.vec3()?;
            }
            "T" => {
                record.expect_len(13)?;
                let v0 = record.vec3()?;
                let v1 = record.vec3()?;
                let v2 = record.vec3()?;
                let material = record.material()?;
                scene.add_triangle(Triangle::new(v0, v1, v2, material));
            }
            other => {
                return Err(record.error(format!("unknown record type '{other}'")));
            }
        }
    }

    Ok(scene)
}

/// Cursor over the fields of one record.
struct Record<'a> {
    line: usize,
    tag: &'a str,
    fields: Vec<&'a str>,
    next: usize,
}

impl<'a> Record<'a> {
    fn new(line: usize, tag: &'a str, fields: Vec<&'a str>) -> Self {
        Self {
            line,
            tag,
            fields,
            next: 0,
        }
    }

    fn error(&self, message: String) -> SceneError {
        SceneError::Parse {
            line: self.line,
            message,
        }
    }

    fn expect_len(&self, expected: usize) -> SceneResult<()> {
        if self.fields.len() != expected {
            return Err(self.error(format!(
                "'{}' record expects {} values, found {}",
                self.tag,
                expected,
                self.fields.len()
            )));
        }
        Ok(())
    }

    fn token(&mut self) -> SceneResult<&'a str> {
        let token = self
            .fields
            .get(self.next)
            .copied()
            .ok_or_else(|| self.error(format!("'{}' record is truncated", self.tag)))?;
        self.next += 1;
        Ok(token)
    }

    fn float(&mut self) -> SceneResult<f32> {
        let token = self.token()?;
        let value: f32 = token
            .parse()
            .map_err(|_| self.error(format!("invalid number '{token}'")))?;
        if !value.is_finite() {
            return Err(self.error(format!("non-finite number '{token}'")));
        }
        Ok(value)
    }

    fn uint(&mut self) -> SceneResult<u32> {
        let token = self.token()?;
        token
            .parse()
            .map_err(|_| self.error(format!("invalid unsigned integer '{token}'")))
    }

    fn vec3(&mut self) -> SceneResult<Vec3> {
        Ok(Vec3::new(self.float()?, self.float()?, self.float()?))
    }

    /// `r g b shininess`
    fn material(&mut self) -> SceneResult<Material> {
        let colour: Color = self.vec3()?;
        let shininess = self.float()?;
        Ok(Material::new(colour, shininess))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = "\
# two spheres and a light
S 0 1 0 1.0   0 0 1   0.0
S 2.3 1 2.5 0.75   1 0 0   0.1
L 1 1 1   0 12 3   5
C 0 2 5   0 0 0   0 1 0   64 48 90 1 100
G 0   0.312 0.785 0.213   0.2
K 0.1 0.2 0.3

T -1 0 -1   1 0 -1   0 2 -1   1 1 1 1
";

    #[test]
    fn test_parse_full_scene() {
        let scene = parse_scene(SCENE).unwrap();

        assert_eq!(scene.spheres.len(), 2);
        assert_eq!(scene.spheres[1].centre, Vec3::new(2.3, 1.0, 2.5));
        assert_eq!(scene.spheres[1].radius, 0.75);
        assert_eq!(scene.spheres[1].material.base_colour, Color::new(1.0, 0.0, 0.0));
        assert_eq!(scene.spheres[1].material.shininess, 0.1);

        assert_eq!(scene.lights.len(), 1);
        assert_eq!(scene.lights[0].position, Vec3::new(0.0, 12.0, 3.0));
        assert_eq!(scene.lights[0].radius, 5.0);

        assert_eq!(scene.camera.width(), 64);
        assert_eq!(scene.camera.height(), 48);
        assert_eq!(scene.camera.position(), Vec3::new(0.0, 2.0, 5.0));

        let ground = scene.ground.unwrap();
        assert_eq!(ground.height, 0.0);
        assert_eq!(ground.material.shininess, 0.2);

        assert_eq!(scene.sky_colour, Color::new(0.1, 0.2, 0.3));
        assert_eq!(scene.triangles.len(), 1);
        assert_eq!(scene.triangles[0].material.shininess, 1.0);
    }

    #[test]
    fn test_defaults_when_records_missing() {
        let scene = parse_scene("S 0 0 5 1 1 0 0 0").unwrap();

        assert_eq!(scene.camera, Camera::default());
        assert_eq!(scene.sky_colour, Color::ZERO);
        assert!(scene.ground.is_none());
    }

    #[test]
    fn test_empty_input() {
        let scene = parse_scene("\n# nothing here\n   \n").unwrap();
        assert!(scene.is_empty());
    }

    #[test]
    fn test_unknown_record() {
        let err = parse_scene("S 0 0 5 1 1 0 0 0\nX 1 2 3").unwrap_err();
        match err {
            SceneError::Parse { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("unknown record"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_field_count() {
        let err = parse_scene("K 1 1").unwrap_err();
        assert!(matches!(err, SceneError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_invalid_number() {
        let err = parse_scene("\n\nS 0 0 five 1 1 0 0 0").unwrap_err();
        match err {
            SceneError::Parse { line, message } => {
                assert_eq!(line, 3);
                assert!(message.contains("five"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_finite_number() {
        let err = parse_scene("K inf 0 0").unwrap_err();
        assert!(matches!(err, SceneError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_zero_radius_loads() {
        let scene = parse_scene("S 0 0 5 0 1 1 1 0").unwrap();
        assert_eq!(scene.spheres[0].radius, 0.0);
    }
}
