fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = native::run() {
        eprintln!("xform_cli error: {err}");
        std::process::exit(1);
    }
}

mod native {
    use std::fmt::Write as _;
    use std::fs;
    use std::path::{Path, PathBuf};

    use xform_engine::TransformError;
    use xform_engine::geom::{self, Axis, PointSet, TransformMatrix};
    use xform_engine::io;
    use xform_engine::raster::{self, Raster};
    use xform_engine::render::{RenderMode, Renderer, validate_render_request, value_range};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const CHECKER_SIZE: (usize, usize) = (64, 48);
    const CHECKER_CELL: usize = 8;

    const USAGE: &str = r"xform_cli (xform-engine)

USAGE:
  xform_cli list
  xform_cli run <scenario|all> [options]

OPTIONS (run):
  --out-dir <dir>    Write <scenario>.snap or <scenario>.png to this dir (required for `all`)
  --snap <path>      Write the snapshot of a point scenario (single scenario only)
  --png <path>       Write the result of a raster scenario (single scenario only)
  --image <path>     Source image for raster scenarios (default: generated checker)
  --overwrite        Overwrite existing output files
  -h, --help         Show this help

Set RUST_LOG=debug to trace every engine call.
";

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_scenarios();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_scenarios() {
        for scenario in Scenario::ALL {
            let kind = if scenario.is_raster() { "raster" } else { "points" };
            println!("{:<32} {kind}", scenario.name());
        }
    }

    struct RunOptions {
        image: Option<PathBuf>,
        overwrite: bool,
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scenario_name = args.next().ok_or("missing scenario name")?;

        let mut out_dir: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut png_path: Option<PathBuf> = None;
        let mut options = RunOptions {
            image: None,
            overwrite: false,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--png" => png_path = Some(PathBuf::from(args.value("--png")?)),
                "--image" => options.image = Some(PathBuf::from(args.value("--image")?)),
                "--overwrite" => options.overwrite = true,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if let Some(dir) = out_dir.as_ref() {
            if snap_path.is_some() || png_path.is_some() {
                return Err("use either --out-dir or --snap/--png (not both)".to_string());
            }

            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            if scenario_name == "all" {
                for scenario in Scenario::ALL {
                    run_one_scenario_to_dir(*scenario, dir, &options)?;
                }
                return Ok(());
            }

            let scenario = Scenario::from_str(scenario_name.as_str())
                .ok_or_else(|| unknown_scenario(&scenario_name))?;
            return run_one_scenario_to_dir(scenario, dir, &options);
        }

        if scenario_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }

        let scenario = Scenario::from_str(scenario_name.as_str())
            .ok_or_else(|| unknown_scenario(&scenario_name))?;

        match run_scenario(scenario, &options)? {
            ScenarioOutput::Snapshot(text) => {
                if png_path.is_some() {
                    return Err(format!("`{}` is a point scenario; use --snap", scenario.name()));
                }
                if let Some(path) = snap_path.as_deref() {
                    write_text_file(path, &text, options.overwrite)?;
                    log::info!("wrote {}", path.display());
                } else {
                    print!("{text}");
                }
            }
            ScenarioOutput::Image(image) => {
                let path = png_path.ok_or_else(|| {
                    format!("`{}` is a raster scenario; use --png or --out-dir", scenario.name())
                })?;
                write_png_file(&path, &image, options.overwrite)?;
                log::info!("wrote {}", path.display());
            }
        }

        Ok(())
    }

    fn run_one_scenario_to_dir(
        scenario: Scenario,
        dir: &Path,
        options: &RunOptions,
    ) -> Result<(), String> {
        let path = match run_scenario(scenario, options)? {
            ScenarioOutput::Snapshot(text) => {
                let path = dir.join(format!("{}.snap", scenario.name()));
                write_text_file(&path, &text, options.overwrite)?;
                path
            }
            ScenarioOutput::Image(image) => {
                let path = dir.join(format!("{}.png", scenario.name()));
                write_png_file(&path, &image, options.overwrite)?;
                path
            }
        };
        log::info!("wrote {}", path.display());
        Ok(())
    }

    fn unknown_scenario(name: &str) -> String {
        let mut msg = format!("unknown scenario `{name}`\n\navailable scenarios:\n");
        for scenario in Scenario::ALL {
            let _ = writeln!(msg, "  {}", scenario.name());
        }
        msg
    }

    fn ensure_writable(path: &Path, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        Ok(())
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        ensure_writable(path, overwrite)?;
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_png_file(path: &Path, image: &Raster, overwrite: bool) -> Result<(), String> {
        ensure_writable(path, overwrite)?;
        io::save(path, image).map_err(|e| format!("save {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        // -0.0 prints as "-0.000000"
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn write_point_line(out: &mut String, point: &[f64]) {
        out.push('p');
        for &c in point {
            out.push(' ');
            write_f64(out, c);
        }
        out.push('\n');
    }

    /// Collects everything a plot would show as snapshot text.
    struct SnapshotRenderer {
        out: String,
    }

    impl SnapshotRenderer {
        fn new(op: &str) -> Self {
            let mut out = String::new();
            let _ = writeln!(out, "# xform-engine snapshot v1");
            let _ = writeln!(out, "op {op}");
            let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
            Self { out }
        }

        fn finish(self) -> String {
            normalize_snapshot_text(&self.out)
        }
    }

    impl Renderer for SnapshotRenderer {
        type Error = std::fmt::Error;

        fn render_points(
            &mut self,
            sets: &[PointSet],
            labels: &[&str],
            mode: RenderMode,
        ) -> Result<(), Self::Error> {
            let mode = match mode {
                RenderMode::TwoD => "2d",
                RenderMode::ThreeD => "3d",
            };
            writeln!(self.out, "mode {mode}")?;
            if let Some((lo, hi)) = value_range(sets) {
                write!(self.out, "range ")?;
                write_f64(&mut self.out, lo);
                self.out.push(' ');
                write_f64(&mut self.out, hi);
                self.out.push('\n');
            }
            for (set, label) in sets.iter().zip(labels) {
                writeln!(self.out, "set {label} {}", set.len())?;
                for point in set.iter() {
                    write_point_line(&mut self.out, point);
                }
            }
            Ok(())
        }

        fn render_raster(&mut self, image: &Raster) -> Result<(), Self::Error> {
            writeln!(
                self.out,
                "raster {}x{}x{}",
                image.width(),
                image.height(),
                image.channels()
            )
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Scenario {
        BatmanRotate,
        BatmanScale,
        BatmanReflect,
        BatmanShear,
        BatmanSwapMatrix,
        CubeRotateX,
        CubeRotateY,
        CubeRotateZ,
        CubeScale,
        CubeReflect,
        CubeShear,
        BatmanPointArray,
        ImageShearReflectRotate,
        ImageRotateReflectShear,
    }

    impl Scenario {
        const ALL: &'static [Scenario] = &[
            Scenario::BatmanRotate,
            Scenario::BatmanScale,
            Scenario::BatmanReflect,
            Scenario::BatmanShear,
            Scenario::BatmanSwapMatrix,
            Scenario::CubeRotateX,
            Scenario::CubeRotateY,
            Scenario::CubeRotateZ,
            Scenario::CubeScale,
            Scenario::CubeReflect,
            Scenario::CubeShear,
            Scenario::BatmanPointArray,
            Scenario::ImageShearReflectRotate,
            Scenario::ImageRotateReflectShear,
        ];

        fn name(self) -> &'static str {
            match self {
                Scenario::BatmanRotate => "batman_rotate",
                Scenario::BatmanScale => "batman_scale",
                Scenario::BatmanReflect => "batman_reflect",
                Scenario::BatmanShear => "batman_shear",
                Scenario::BatmanSwapMatrix => "batman_swap_matrix",
                Scenario::CubeRotateX => "cube_rotate_x",
                Scenario::CubeRotateY => "cube_rotate_y",
                Scenario::CubeRotateZ => "cube_rotate_z",
                Scenario::CubeScale => "cube_scale",
                Scenario::CubeReflect => "cube_reflect",
                Scenario::CubeShear => "cube_shear",
                Scenario::BatmanPointArray => "batman_point_array",
                Scenario::ImageShearReflectRotate => "image_shear_reflect_rotate",
                Scenario::ImageRotateReflectShear => "image_rotate_reflect_shear",
            }
        }

        fn from_str(name: &str) -> Option<Self> {
            Scenario::ALL.iter().copied().find(|s| s.name() == name)
        }

        fn is_raster(self) -> bool {
            matches!(
                self,
                Scenario::ImageShearReflectRotate | Scenario::ImageRotateReflectShear
            )
        }
    }

    enum ScenarioOutput {
        Snapshot(String),
        Image(Raster),
    }

    fn run_scenario(scenario: Scenario, options: &RunOptions) -> Result<ScenarioOutput, String> {
        if scenario.is_raster() {
            return raster_chain(scenario, options).map(ScenarioOutput::Image);
        }
        if scenario == Scenario::BatmanPointArray {
            return point_array_snapshot(scenario);
        }

        let original = match scenario {
            Scenario::CubeRotateX
            | Scenario::CubeRotateY
            | Scenario::CubeRotateZ
            | Scenario::CubeScale
            | Scenario::CubeReflect
            | Scenario::CubeShear => unit_cube(),
            _ => batman(),
        }
        .map_err(|e| e.to_string())?;

        let transformed = transform_points(scenario, &original).map_err(|e| e.to_string())?;
        render_snapshot(scenario, &[original, transformed], &["Original", "Transformed"])
    }

    fn transform_points(scenario: Scenario, points: &PointSet) -> xform_engine::Result<PointSet> {
        match scenario {
            Scenario::BatmanRotate => geom::rotate_points(points, 45.0, Axis::Z),
            Scenario::BatmanScale => geom::scale_points(points, &[2.0, 2.0]),
            Scenario::BatmanReflect => geom::reflect_points(points, &[false, true]),
            Scenario::BatmanShear => geom::shear_points(points, 2.0, 0, 1),
            Scenario::BatmanSwapMatrix => {
                let swap = TransformMatrix::new(&[[0.0, 1.0], [1.0, 0.0]])?;
                geom::apply_inferred(points, &swap)
            }
            Scenario::CubeRotateX => geom::rotate_points(points, 45.0, Axis::X),
            Scenario::CubeRotateY => geom::rotate_points(points, 45.0, Axis::Y),
            Scenario::CubeRotateZ => geom::rotate_points(points, 45.0, Axis::Z),
            Scenario::CubeScale => geom::scale_points(points, &[1.0, 2.0, 1.0]),
            Scenario::CubeReflect => geom::reflect_points(points, &[true, true, false]),
            Scenario::CubeShear => geom::shear_points(points, 1.0, 2, 1),
            Scenario::BatmanPointArray
            | Scenario::ImageShearReflectRotate
            | Scenario::ImageRotateReflectShear => Err(TransformError::InvalidParameter {
                reason: format!("`{}` is not a single point transform", scenario.name()),
            }),
        }
    }

    fn point_array_snapshot(scenario: Scenario) -> Result<ScenarioOutput, String> {
        let err = |e: TransformError| e.to_string();
        let shape = batman().map_err(err)?;
        let sets = vec![
            raster::rotate_point_array(&shape, 45.0, 1.0).map_err(err)?,
            raster::scale_point_array(&shape, 2.0).map_err(err)?,
            raster::reflect_point_array(&shape, Axis::Y).map_err(err)?,
            raster::shear_point_array(&shape, 1.0, Axis::X).map_err(err)?,
            shape,
        ];
        render_snapshot(
            scenario,
            &sets,
            &["Rotated", "Scaled", "Reflected", "Sheared", "Original"],
        )
    }

    fn render_snapshot(
        scenario: Scenario,
        sets: &[PointSet],
        labels: &[&str],
    ) -> Result<ScenarioOutput, String> {
        let mode = validate_render_request(sets, labels).map_err(|e| e.to_string())?;
        let mut renderer = SnapshotRenderer::new(scenario.name());
        renderer
            .render_points(sets, labels, mode)
            .map_err(|e| format!("render {}: {e}", scenario.name()))?;
        log::info!("{}: {} sets, {mode:?}", scenario.name(), sets.len());
        Ok(ScenarioOutput::Snapshot(renderer.finish()))
    }

    fn raster_chain(scenario: Scenario, options: &RunOptions) -> Result<Raster, String> {
        let source = match options.image.as_deref() {
            Some(path) => io::load(path).map_err(|e| format!("load {}: {e}", path.display()))?,
            None => checker().map_err(|e| e.to_string())?,
        };
        let result = if scenario == Scenario::ImageShearReflectRotate {
            shear_reflect_rotate(&source)
        } else {
            rotate_reflect_shear(&source)
        }
        .map_err(|e| e.to_string())?;

        let mut summary = SnapshotRenderer::new(scenario.name());
        summary
            .render_raster(&result)
            .map_err(|e| format!("render {}: {e}", scenario.name()))?;
        log::info!("{}", summary.finish().lines().last().unwrap_or_default());
        Ok(result)
    }

    fn shear_reflect_rotate(source: &Raster) -> xform_engine::Result<Raster> {
        let step = raster::shear(source, 0.5, Axis::X)?;
        let step = raster::reflect(&step, Axis::Y)?;
        raster::rotate(&step, 90.0)
    }

    fn rotate_reflect_shear(source: &Raster) -> xform_engine::Result<Raster> {
        let step = raster::rotate(source, 90.0)?;
        let step = raster::reflect(&step, Axis::Y)?;
        raster::shear(&step, 0.5, Axis::X)
    }

    fn checker() -> xform_engine::Result<Raster> {
        let (width, height) = CHECKER_SIZE;
        Raster::from_fn(width, height, |x, y| {
            let on = (x / CHECKER_CELL + y / CHECKER_CELL) % 2 == 0;
            let shade = u8::try_from(x * 255 / (width - 1)).unwrap_or(u8::MAX);
            if on { [shade, 40, 200] } else { [20, 20, 20] }
        })
    }

    fn batman() -> xform_engine::Result<PointSet> {
        PointSet::from_rows(&[
            [0.0, 0.0],
            [1.0, 0.2],
            [0.4, 1.0],
            [0.5, 0.4],
            [0.0, 0.8],
            [-0.5, 0.4],
            [-0.4, 1.0],
            [-1.5, 0.5],
            [0.0, 0.0],
        ])
    }

    fn unit_cube() -> xform_engine::Result<PointSet> {
        PointSet::from_rows(&[
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
            [0.0, 1.0, 1.0],
            [0.0, 0.0, 1.0],
        ])
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next().ok_or_else(|| format!("missing value for {flag}"))
        }
    }

}
